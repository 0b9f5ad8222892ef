//! # Text
//!
//! Measuring and outlining strings. Shaping goes through `rustybuzz`, outlines are read with the
//! `ttf_parser` it re-exports and converted straight into tiny-skia paths.

use std::sync::Arc;

use rustybuzz::ttf_parser;

/// Anything that can tell how wide a run of text is.
pub trait TextMetrics {
    /// Advance width in pixels of `text` set at `font_size` pixels per em.
    fn measure(&self, text: &str, font_size: f32) -> f32;
}

/// Every char advances by `factor * font_size`. Used when no font is available.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedAdvance(pub f32);
impl Default for FixedAdvance {
    fn default() -> Self {
        Self(0.5)
    }
}
impl TextMetrics for FixedAdvance {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * self.0 * font_size
    }
}

#[derive(thiserror::Error, Debug)]
pub enum FontError {
    #[error("reading font: {0}")]
    Io(#[from] std::io::Error),
    #[error("data is not a font face, or face index {0} is out of range")]
    Parse(u32),
}

/// An owned font face.
#[derive(Clone)]
pub struct Font {
    data: Arc<[u8]>,
    index: u32,
}
impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("bytes", &self.data.len())
            .field("index", &self.index)
            .finish()
    }
}
impl Font {
    pub fn from_data(data: impl Into<Arc<[u8]>>, index: u32) -> Result<Self, FontError> {
        let data = data.into();
        if rustybuzz::Face::from_slice(&data, index).is_none() {
            return Err(FontError::Parse(index));
        }
        Ok(Self { data, index })
    }
    pub fn from_path(path: &std::path::Path) -> Result<Self, FontError> {
        Self::from_data(std::fs::read(path)?, 0)
    }
    fn face(&self) -> Option<rustybuzz::Face<'_>> {
        // Checked on construction, but parsing is cheap enough to redo rather than self-borrow.
        rustybuzz::Face::from_slice(&self.data, self.index)
    }
    fn shape(face: &rustybuzz::Face<'_>, text: &str) -> rustybuzz::GlyphBuffer {
        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        rustybuzz::shape(face, &[], buffer)
    }
    /// Outline `text` with its baseline origin at `origin`. `None` if nothing has an outline
    /// (whitespace, or a color-bitmap-only font).
    #[must_use]
    pub fn outline(
        &self,
        text: &str,
        origin: [f32; 2],
        font_size: f32,
    ) -> Option<tiny_skia::Path> {
        let face = self.face()?;
        let px_per_unit = font_size / f32::from(face.as_ref().units_per_em());
        let glyphs = Self::shape(&face, text);

        let mut sink = OutlineSink {
            builder: tiny_skia::PathBuilder::new(),
            origin,
            scale: px_per_unit,
        };
        let mut cursor = [0i32; 2];
        for (glyph, pos) in glyphs
            .glyph_infos()
            .iter()
            .zip(glyphs.glyph_positions().iter())
        {
            // rustybuzz glyph ids are u16 stored in a u32.
            let Ok(id) = u16::try_from(glyph.glyph_id) else {
                continue;
            };
            sink.origin = [
                origin[0] + cursor[0].wrapping_add(pos.x_offset) as f32 * px_per_unit,
                origin[1] - cursor[1].wrapping_add(pos.y_offset) as f32 * px_per_unit,
            ];
            // Glyphs without outlines (spaces) are fine.
            let _ = face
                .as_ref()
                .outline_glyph(ttf_parser::GlyphId(id), &mut sink);
            cursor = [
                cursor[0].wrapping_add(pos.x_advance),
                cursor[1].wrapping_add(pos.y_advance),
            ];
        }
        sink.builder.finish()
    }
}
impl TextMetrics for Font {
    fn measure(&self, text: &str, font_size: f32) -> f32 {
        let Some(face) = self.face() else {
            return 0.0;
        };
        let px_per_unit = font_size / f32::from(face.as_ref().units_per_em());
        let advance: i64 = Self::shape(&face, text)
            .glyph_positions()
            .iter()
            .map(|pos| i64::from(pos.x_advance))
            .sum();
        advance as f32 * px_per_unit
    }
}

/// Font units (y-up) into surface pixels (y-down), appended to a path.
struct OutlineSink {
    builder: tiny_skia::PathBuilder,
    origin: [f32; 2],
    scale: f32,
}
impl OutlineSink {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.origin[0] + x * self.scale,
            self.origin[1] - y * self.scale,
        )
    }
}
impl ttf_parser::OutlineBuilder for OutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }
    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }
    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }
    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }
    fn close(&mut self) {
        self.builder.close();
    }
}

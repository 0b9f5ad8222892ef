//! # Raster canvas
//!
//! The CPU pixel buffer that history is replayed onto, backed by a tiny-skia [`tiny_skia::Pixmap`].

use std::sync::Arc;

use crate::{
    background::Background,
    canvas::Canvas,
    color::Color,
    operation::{EmojiOperation, FilledScreen, StrokeOperation, TextOperation},
    style::Style,
    text::{FixedAdvance, Font, TextMetrics},
    util::IntRect,
};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    #[error("can't allocate a {0}x{1} pixmap")]
    Alloc(u32, u32),
    #[error("crop rectangle {0:?} is empty or outside the surface")]
    Crop(IntRect),
}

pub struct Raster {
    pixmap: tiny_skia::Pixmap,
    font: Option<Arc<Font>>,
}
impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("font", &self.font)
            .finish()
    }
}
impl Raster {
    /// A fully transparent raster.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(RasterError::Alloc(width, height))?;
        Ok(Self { pixmap, font: None })
    }
    /// Font for emoji glyphs and text boxes. Without one, emoji paint as solid squares.
    #[must_use]
    pub fn with_font(self, font: Option<Arc<Font>>) -> Self {
        Self { font, ..self }
    }
    #[must_use]
    pub fn pixmap(&self) -> &tiny_skia::Pixmap {
        &self.pixmap
    }
    #[must_use]
    pub fn into_pixmap(self) -> tiny_skia::Pixmap {
        self.pixmap
    }
    /// Copy out a region, as for exporting a trimmed drawing.
    pub fn crop(&self, rect: IntRect) -> Result<tiny_skia::Pixmap, RasterError> {
        if rect.is_empty() {
            return Err(RasterError::Crop(rect));
        }
        let int_rect = tiny_skia::IntRect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom)
            .ok_or(RasterError::Crop(rect))?;
        self.pixmap
            .clone_rect(int_rect)
            .ok_or(RasterError::Crop(rect))
    }
    fn metrics(&self) -> &dyn TextMetrics {
        const FALLBACK: FixedAdvance = FixedAdvance(0.5);
        match &self.font {
            Some(font) => &**font,
            None => &FALLBACK,
        }
    }
    /// Pre-render a text box: `text` in `style`, surrounded by `padding` on every side.
    /// This is what [`crate::surface::DrawingSurface::draw_text_bitmap`] expects to receive.
    pub fn render_text_bitmap(
        &self,
        text: &str,
        style: &Style,
        padding: f32,
    ) -> Result<tiny_skia::Pixmap, RasterError> {
        let width = (self.metrics().measure(text, style.font_size) + 2.0 * padding).ceil();
        let height = (style.font_size + 2.0 * padding).ceil();
        let (width, height) = (width.max(1.0) as u32, height.max(1.0) as u32);
        let mut bitmap =
            tiny_skia::Pixmap::new(width, height).ok_or(RasterError::Alloc(width, height))?;
        // Approximate ascent, keeps most descenders inside the box.
        let baseline = [padding, padding + style.font_size * 0.8];
        if let Some(path) = self
            .font
            .as_ref()
            .and_then(|font| font.outline(text, baseline, style.font_size))
        {
            bitmap.fill_path(
                &path,
                &style.paint(),
                tiny_skia::FillRule::Winding,
                tiny_skia::Transform::identity(),
                None,
            );
        } else {
            log::debug!("no outlines for {text:?}, text box left blank");
        }
        Ok(bitmap)
    }
}

impl Canvas for Raster {
    fn size(&self) -> [u32; 2] {
        [self.pixmap.width(), self.pixmap.height()]
    }
    fn clear(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }
    fn draw_background(&mut self, background: &Background) {
        let transform = background.transform(self.size());
        let paint = tiny_skia::PixmapPaint {
            quality: tiny_skia::FilterQuality::Bilinear,
            ..Default::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, background.image().as_ref(), &paint, transform, None);
    }
    fn draw_stroke(&mut self, stroke: &StrokeOperation) {
        let Some(path) = stroke.path().to_skia() else {
            return;
        };
        let style = stroke.style();
        self.pixmap.stroke_path(
            &path,
            &style.paint(),
            &style.stroke(),
            tiny_skia::Transform::identity(),
            None,
        );
    }
    fn draw_emoji(&mut self, emoji: &EmojiOperation) {
        let style = emoji.style();
        let [x, y] = emoji.position();
        let outline = self
            .font
            .as_ref()
            .and_then(|font| font.outline(emoji.text(), [x, y], style.font_size));
        match outline {
            Some(path) => self.pixmap.fill_path(
                &path,
                &style.paint(),
                tiny_skia::FillRule::Winding,
                tiny_skia::Transform::identity(),
                None,
            ),
            None => {
                // Same square the trim box assumes.
                let size = style.font_size;
                if let Some(rect) = tiny_skia::Rect::from_xywh(x, y - size, size, size) {
                    self.pixmap.fill_rect(
                        rect,
                        &style.paint(),
                        tiny_skia::Transform::identity(),
                        None,
                    );
                }
            }
        }
    }
    fn draw_text(&mut self, text: &TextOperation, bitmap: &tiny_skia::Pixmap) {
        let [x, y] = text.position();
        let scale = text.scale();
        let paint = tiny_skia::PixmapPaint {
            quality: tiny_skia::FilterQuality::Bilinear,
            ..Default::default()
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            bitmap.as_ref(),
            &paint,
            tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, x, y),
            None,
        );
    }
    fn fill_screen(&mut self, fill: &FilledScreen) {
        let [width, height] = fill.size();
        if let Some(rect) = tiny_skia::Rect::from_xywh(0.0, 0.0, width, height) {
            self.pixmap.fill_rect(
                rect,
                &fill.style().paint(),
                tiny_skia::Transform::identity(),
                None,
            );
        }
    }
}

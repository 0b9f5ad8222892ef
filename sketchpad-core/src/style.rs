//! # Style
//!
//! Paint settings. The surface owns a mutable [`PaintState`], and every operation copies a [`Style`]
//! out of it at the moment it is recorded, so later setting changes never reach back into history.

use crate::color::Color;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Cap {
    Butt,
    #[default]
    Round,
    Square,
}
impl From<Cap> for tiny_skia::LineCap {
    fn from(value: Cap) -> Self {
        match value {
            Cap::Butt => Self::Butt,
            Cap::Round => Self::Round,
            Cap::Square => Self::Square,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Join {
    Miter,
    #[default]
    Round,
    Bevel,
}
impl From<Join> for tiny_skia::LineJoin {
    fn from(value: Join) -> Self {
        match value {
            Join::Miter => Self::Miter,
            Join::Round => Self::Round,
            Join::Bevel => Self::Bevel,
        }
    }
}

/// An immutable snapshot of paint settings.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Style {
    pub color: Color,
    /// Stroke width, in pixels.
    pub width: f32,
    pub cap: Cap,
    pub join: Join,
    /// Glyph size in pixels, for emoji and text.
    pub font_size: f32,
}
impl Default for Style {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            cap: Cap::default(),
            join: Join::default(),
            // Matches the usual platform default text size.
            font_size: 12.0,
        }
    }
}
impl Style {
    #[must_use]
    pub fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }
    /// A tiny-skia paint filling with this style's color.
    #[must_use]
    pub fn paint(&self) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color(self.color.to_skia());
        paint.anti_alias = true;
        paint
    }
    #[must_use]
    pub fn stroke(&self) -> tiny_skia::Stroke {
        tiny_skia::Stroke {
            width: self.width,
            line_cap: self.cap.into(),
            line_join: self.join.into(),
            ..Default::default()
        }
    }
}

/// The live, mutable paint settings of a surface.
#[derive(Clone, Debug)]
pub struct PaintState {
    /// Freehand strokes and full screen fills.
    pub stroke: Style,
    pub emoji: Style,
    /// Committed text boxes.
    pub text: Style,
    /// The glyph placed in emoji mode, if one was chosen.
    pub emoji_text: Option<String>,
}
impl PaintState {
    #[must_use]
    pub fn new(stroke_width: f32, emoji_size: f32, text_size: f32) -> Self {
        Self {
            stroke: Style {
                width: stroke_width,
                ..Style::default()
            },
            emoji: Style {
                font_size: emoji_size,
                ..Style::default()
            },
            text: Style {
                font_size: text_size,
                ..Style::default()
            },
            emoji_text: None,
        }
    }
    /// Color applies to strokes and emoji alike. Text boxes arrive pre-rendered.
    pub fn set_color(&mut self, color: Color) {
        self.stroke.color = color;
        self.emoji.color = color;
    }
    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke.width = width;
    }
    pub fn set_emoji(&mut self, emoji: String, size: f32) {
        self.emoji_text = Some(emoji);
        self.emoji.font_size = size;
    }
    pub fn set_text_size(&mut self, size: f32) {
        self.text.font_size = size;
    }
}
impl Default for PaintState {
    fn default() -> Self {
        Self::new(8.0, 64.0, 12.0)
    }
}

//! # Operations
//!
//! An operation is one recorded user action. They are built once, when a gesture completes, and are
//! never changed afterwards. Each carries its own [`Style`] snapshot.

use std::sync::Arc;

use crate::{canvas::Canvas, path::StrokePath, style::Style, util::Rect};

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationError {
    #[error("stroke path has no points")]
    EmptyPath,
    #[error("operation contains a non-finite coordinate or size")]
    NotFinite,
    #[error("emoji text is empty")]
    EmptyEmoji,
    #[error("fill extent must be positive")]
    EmptyFill,
}

fn finite(values: &[f32]) -> Result<(), OperationError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(OperationError::NotFinite)
    }
}

/// A freehand line.
#[derive(Clone, PartialEq, Debug)]
pub struct StrokeOperation {
    path: StrokePath,
    style: Style,
    /// Computed once from the path that was drawn.
    bounds: Rect,
}
impl StrokeOperation {
    pub fn new(path: StrokePath, style: Style) -> Result<Self, OperationError> {
        // Checked per point, min/max over the bounds would skip a NaN.
        if !path.points().flatten().all(f32::is_finite) {
            return Err(OperationError::NotFinite);
        }
        let bounds = path.bounds().ok_or(OperationError::EmptyPath)?;
        finite(&[style.width])?;
        Ok(Self {
            path,
            style,
            bounds,
        })
    }
    #[must_use]
    pub fn path(&self) -> &StrokePath {
        &self.path
    }
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

/// A glyph placed with its baseline origin at `(x, y)`.
#[derive(Clone, PartialEq, Debug)]
pub struct EmojiOperation {
    text: String,
    x: f32,
    y: f32,
    style: Style,
}
impl EmojiOperation {
    pub fn new(text: String, x: f32, y: f32, style: Style) -> Result<Self, OperationError> {
        if text.is_empty() {
            return Err(OperationError::EmptyEmoji);
        }
        finite(&[x, y, style.font_size])?;
        Ok(Self { text, x, y, style })
    }
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
    #[must_use]
    pub fn position(&self) -> [f32; 2] {
        [self.x, self.y]
    }
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }
}

#[derive(Clone)]
pub enum TextState {
    /// A committed text box, pre-rendered.
    Visible(Arc<tiny_skia::Pixmap>),
    /// Suppresses the text before it until removed again by [`crate::history::DrawingHistory::show_text`].
    Hidden,
    /// "No text". Supersedes the text before it permanently.
    Erased,
}
// Bitmaps compare by identity, pixel comparisons are never what's wanted here.
impl PartialEq for TextState {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Visible(a), Self::Visible(b)) => Arc::ptr_eq(a, b),
            (Self::Hidden, Self::Hidden) | (Self::Erased, Self::Erased) => true,
            _ => false,
        }
    }
}
impl std::fmt::Debug for TextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Visible(bitmap) => write!(f, "Visible({}x{})", bitmap.width(), bitmap.height()),
            Self::Hidden => f.write_str("Hidden"),
            Self::Erased => f.write_str("Erased"),
        }
    }
}

/// A pre-rendered text box, or one of the markers sharing its shape.
#[derive(Clone, PartialEq, Debug)]
pub struct TextOperation {
    state: TextState,
    x: f32,
    y: f32,
    text: String,
    scale: f32,
    style: Style,
}
impl TextOperation {
    pub fn visible(
        bitmap: Arc<tiny_skia::Pixmap>,
        x: f32,
        y: f32,
        text: String,
        scale: f32,
        style: Style,
    ) -> Result<Self, OperationError> {
        finite(&[x, y, scale, style.font_size])?;
        Ok(Self {
            state: TextState::Visible(bitmap),
            x,
            y,
            text,
            scale,
            style,
        })
    }
    #[must_use]
    pub fn hidden() -> Self {
        Self::marker(TextState::Hidden)
    }
    #[must_use]
    pub fn erased() -> Self {
        Self::marker(TextState::Erased)
    }
    fn marker(state: TextState) -> Self {
        Self {
            state,
            x: 0.0,
            y: 0.0,
            text: String::new(),
            scale: 1.0,
            style: Style::default(),
        }
    }
    #[must_use]
    pub fn state(&self) -> &TextState {
        &self.state
    }
    #[must_use]
    pub fn bitmap(&self) -> Option<&tiny_skia::Pixmap> {
        match &self.state {
            TextState::Visible(bitmap) => Some(bitmap),
            TextState::Hidden | TextState::Erased => None,
        }
    }
    #[must_use]
    pub fn is_visible(&self) -> bool {
        matches!(self.state, TextState::Visible(_))
    }
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self.state, TextState::Hidden)
    }
    #[must_use]
    pub fn position(&self) -> [f32; 2] {
        [self.x, self.y]
    }
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// The whole surface flooded with one color.
#[derive(Clone, PartialEq, Debug)]
pub struct FilledScreen {
    width: f32,
    height: f32,
    style: Style,
}
impl FilledScreen {
    pub fn new(width: f32, height: f32, style: Style) -> Result<Self, OperationError> {
        finite(&[width, height])?;
        if width <= 0.0 || height <= 0.0 {
            return Err(OperationError::EmptyFill);
        }
        Ok(Self {
            width,
            height,
            style,
        })
    }
    #[must_use]
    pub fn size(&self) -> [f32; 2] {
        [self.width, self.height]
    }
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum Operation {
    Stroke(StrokeOperation),
    Emoji(EmojiOperation),
    Text(TextOperation),
    FilledScreen(FilledScreen),
}
impl From<StrokeOperation> for Operation {
    fn from(value: StrokeOperation) -> Self {
        Self::Stroke(value)
    }
}
impl From<EmojiOperation> for Operation {
    fn from(value: EmojiOperation) -> Self {
        Self::Emoji(value)
    }
}
impl From<TextOperation> for Operation {
    fn from(value: TextOperation) -> Self {
        Self::Text(value)
    }
}
impl From<FilledScreen> for Operation {
    fn from(value: FilledScreen) -> Self {
        Self::FilledScreen(value)
    }
}
impl Operation {
    #[must_use]
    pub fn stroke(&self) -> Option<&StrokeOperation> {
        match self {
            Self::Stroke(s) => Some(s),
            _ => None,
        }
    }
    #[must_use]
    pub fn emoji(&self) -> Option<&EmojiOperation> {
        match self {
            Self::Emoji(e) => Some(e),
            _ => None,
        }
    }
    #[must_use]
    pub fn text(&self) -> Option<&TextOperation> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }
    #[must_use]
    pub fn filled_screen(&self) -> Option<&FilledScreen> {
        match self {
            Self::FilledScreen(f) => Some(f),
            _ => None,
        }
    }
    /// Paint onto `canvas`. Hidden and erased text paint nothing.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        match self {
            Self::Stroke(stroke) => canvas.draw_stroke(stroke),
            Self::Emoji(emoji) => canvas.draw_emoji(emoji),
            Self::Text(text) => {
                if let Some(bitmap) = text.bitmap() {
                    canvas.draw_text(text, bitmap);
                }
            }
            Self::FilledScreen(fill) => canvas.fill_screen(fill),
        }
    }
}

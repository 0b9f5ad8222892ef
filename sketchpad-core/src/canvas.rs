//! # Canvas
//!
//! The paint target that history is replayed onto. [`crate::raster::Raster`] is the real one.

use crate::{
    background::Background,
    color::Color,
    operation::{EmojiOperation, FilledScreen, StrokeOperation, TextOperation},
};

pub trait Canvas {
    /// Size in pixels.
    fn size(&self) -> [u32; 2];
    /// Flood the whole canvas, discarding everything on it.
    fn clear(&mut self, color: Color);
    fn draw_background(&mut self, background: &Background);
    fn draw_stroke(&mut self, stroke: &StrokeOperation);
    fn draw_emoji(&mut self, emoji: &EmojiOperation);
    /// Only ever called for visible text, with its bitmap.
    fn draw_text(&mut self, text: &TextOperation, bitmap: &tiny_skia::Pixmap);
    fn fill_screen(&mut self, fill: &FilledScreen);
    /// A full redraw finished and may be shown.
    fn present(&mut self) {}
}

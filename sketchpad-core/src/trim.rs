//! # Trim box
//!
//! The smallest pixel rectangle holding everything visible, used to crop an exported drawing.
//!
//! With a background image, the box starts as the image's placement and may only grow along the axis
//! the image does not already span. Without one, it starts inverted and is tightened onto the content.
//! A full screen fill anywhere means nothing can be trimmed at all.

use crate::{
    background::BackgroundPlacement,
    history::DrawingHistory,
    operation::Operation,
    text::TextMetrics,
    util::IntRect,
};

pub type TrimBox = IntRect;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrimSettings {
    /// Margin added around content, in pixels.
    pub trim_buffer: i32,
    /// Padding around a rendered text box, before scaling.
    pub text_padding: f32,
}
impl Default for TrimSettings {
    fn default() -> Self {
        Self {
            trim_buffer: 24,
            text_padding: 16.0,
        }
    }
}

/// `f32 -> i32`, truncating toward zero.
fn px(value: f32) -> i32 {
    value as i32
}

/// Extent of a single operation, or `None` if it paints nothing that should be kept.
fn extent(
    operation: &Operation,
    history: &DrawingHistory,
    settings: &TrimSettings,
    metrics: &dyn TextMetrics,
) -> Option<IntRect> {
    match operation {
        Operation::Stroke(stroke) => {
            let bounds = stroke.bounds();
            Some(IntRect::from_ltrb(
                px(bounds.left),
                px(bounds.top),
                px(bounds.right),
                px(bounds.bottom),
            ))
        }
        Operation::Emoji(emoji) => {
            // Treated as a font_size square sitting on its baseline.
            let [x, y] = emoji.position();
            let size = emoji.style().font_size;
            Some(IntRect::from_ltrb(px(x), px(y - size), px(x + size), px(y)))
        }
        Operation::Text(text) => {
            // Only the text replay would paint counts.
            let current = history
                .last_text()
                .is_some_and(|last| std::ptr::eq(last, text));
            if !current || !text.is_visible() {
                return None;
            }
            let [x, y] = text.position();
            let size = text.style().font_size;
            let padding = 2.0 * settings.text_padding;
            let width = (metrics.measure(text.text(), size) + padding) * text.scale();
            let height = (size + padding) * text.scale();
            Some(IntRect::from_ltrb(
                px(x),
                px(y),
                px(x + width),
                px(y + height),
            ))
        }
        // Handled by the caller.
        Operation::FilledScreen(_) => None,
    }
}

/// Derive the crop rectangle for a surface of `surface` size.
#[must_use]
pub fn trim_box(
    history: &DrawingHistory,
    surface: [u32; 2],
    background: Option<BackgroundPlacement>,
    settings: &TrimSettings,
    metrics: &dyn TextMetrics,
) -> TrimBox {
    let full = IntRect::from_size(surface);
    let (mut bbox, check_left_right, check_top_bottom) = match background {
        None => (
            IntRect::from_ltrb(full.right, full.bottom, 0, 0),
            true,
            true,
        ),
        Some(placement) if placement.landscape => (placement.image, false, true),
        Some(placement) => (placement.image, true, false),
    };

    let mut found_content = false;
    for operation in history {
        if operation.filled_screen().is_some() {
            bbox = full;
            found_content = true;
            break;
        }
        let Some(extent) = extent(operation, history, settings, metrics) else {
            continue;
        };
        found_content = true;
        if check_top_bottom {
            bbox.top = bbox.top.min(extent.top);
            bbox.bottom = bbox.bottom.max(extent.bottom);
        }
        if check_left_right {
            bbox.left = bbox.left.min(extent.left);
            bbox.right = bbox.right.max(extent.right);
        }
    }
    if !found_content && background.is_none() {
        // Nothing drawn and nothing to fit to.
        return full;
    }

    // Pad each side, except where the box already sits on or inside the image edge.
    let buffer = settings.trim_buffer;
    let [mut left, mut top, mut right, mut bottom] = [buffer; 4];
    if let Some(placement) = background {
        let image = placement.image;
        if bbox.left >= image.left {
            left = 0;
        }
        if bbox.right <= image.right {
            right = 0;
        }
        if bbox.top >= image.top {
            top = 0;
        }
        if bbox.bottom <= image.bottom {
            bottom = 0;
        }
    }
    IntRect::from_ltrb(
        bbox.left.saturating_sub(left).max(0),
        bbox.top.saturating_sub(top).max(0),
        bbox.right.saturating_add(right).min(full.right),
        bbox.bottom.saturating_add(bottom).min(full.bottom),
    )
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::{trim_box, TrimSettings};
    use crate::{
        background::BackgroundPlacement,
        history::DrawingHistory,
        operation::{EmojiOperation, FilledScreen, StrokeOperation, TextOperation},
        path::StrokePath,
        style::Style,
        text::FixedAdvance,
        util::IntRect,
    };

    const SETTINGS: TrimSettings = TrimSettings {
        trim_buffer: 10,
        text_padding: 4.0,
    };

    fn stroke(left: f32, top: f32, right: f32, bottom: f32) -> StrokeOperation {
        let mut path = StrokePath::new();
        path.move_to([left, top]);
        path.quad_to([right, top], [right, bottom]);
        StrokeOperation::new(path, Style::default()).unwrap()
    }
    fn emoji(x: f32, y: f32, size: f32) -> EmojiOperation {
        let style = Style {
            font_size: size,
            ..Style::default()
        };
        EmojiOperation::new("*".into(), x, y, style).unwrap()
    }
    fn text(content: &str, x: f32, y: f32, scale: f32) -> TextOperation {
        let style = Style {
            font_size: 20.0,
            ..Style::default()
        };
        let bitmap = Arc::new(tiny_skia::Pixmap::new(1, 1).unwrap());
        TextOperation::visible(bitmap, x, y, content.into(), scale, style).unwrap()
    }
    fn trim(history: &DrawingHistory, background: Option<BackgroundPlacement>) -> IntRect {
        trim_box(history, [1000, 1000], background, &SETTINGS, &FixedAdvance(0.5))
    }

    #[test]
    fn union_of_stroke_and_emoji() {
        let mut history = DrawingHistory::new();
        history.append(stroke(100.0, 100.0, 200.0, 200.0));
        history.append(emoji(500.0, 500.0, 50.0));
        // The emoji's bottom edge is its baseline, it extends up from there.
        assert_eq!(trim(&history, None), IntRect::from_ltrb(90, 90, 560, 510));
    }
    #[test]
    fn clamped_to_surface() {
        let mut history = DrawingHistory::new();
        history.append(stroke(3.0, 5.0, 995.0, 999.5));
        assert_eq!(trim(&history, None), IntRect::from_ltrb(0, 0, 1000, 1000));
    }
    #[test]
    fn fill_short_circuits() {
        let mut history = DrawingHistory::new();
        history.append(stroke(100.0, 100.0, 200.0, 200.0));
        history.append(FilledScreen::new(1000.0, 1000.0, Style::default()).unwrap());
        history.append(emoji(500.0, 500.0, 50.0));
        assert_eq!(trim(&history, None), IntRect::from_ltrb(0, 0, 1000, 1000));
        let landscape = BackgroundPlacement::fit([1000, 1000], [400, 200]);
        assert_eq!(
            trim(&history, Some(landscape)),
            IntRect::from_ltrb(0, 0, 1000, 1000)
        );
    }
    #[test]
    fn empty_is_full_surface() {
        assert_eq!(
            trim(&DrawingHistory::new(), None),
            IntRect::from_ltrb(0, 0, 1000, 1000)
        );
    }
    #[test]
    fn text_extent() {
        let mut history = DrawingHistory::new();
        // width: (4 chars * 0.5 * 20 + 8) * 2 = 96, height: (20 + 8) * 2 = 56
        history.append(text("abcd", 300.0, 400.0, 2.0));
        assert_eq!(trim(&history, None), IntRect::from_ltrb(290, 390, 406, 466));
    }
    #[test]
    fn only_current_text_counts() {
        let mut history = DrawingHistory::new();
        history.append(text("far away", 0.0, 0.0, 1.0));
        history.append(text("a", 500.0, 500.0, 1.0));
        // a: width 10 + 8 = 18, height 28
        assert_eq!(trim(&history, None), IntRect::from_ltrb(490, 490, 528, 538));
        // Hidden text contributes nothing at all.
        history.hide_text();
        assert_eq!(trim(&history, None), IntRect::from_ltrb(0, 0, 1000, 1000));
    }
    #[test]
    fn landscape_background_grows_vertically() {
        // Image band spans y in 250..750.
        let placement = BackgroundPlacement::fit([1000, 1000], [400, 200]);
        let mut history = DrawingHistory::new();
        assert_eq!(
            trim(&history, Some(placement)),
            IntRect::from_ltrb(0, 250, 1000, 750)
        );
        // Inside the band: nothing changes.
        history.append(stroke(400.0, 300.0, 600.0, 400.0));
        assert_eq!(
            trim(&history, Some(placement)),
            IntRect::from_ltrb(0, 250, 1000, 750)
        );
        // Above the band: grows up, and only that side gets a buffer.
        history.append(emoji(10.0, 200.0, 50.0));
        assert_eq!(
            trim(&history, Some(placement)),
            IntRect::from_ltrb(0, 140, 1000, 750)
        );
    }
    #[test]
    fn portrait_background_grows_horizontally() {
        // Image band spans x in 250..750.
        let placement = BackgroundPlacement::fit([1000, 1000], [500, 1000]);
        assert_eq!(placement.image, IntRect::from_ltrb(250, 0, 750, 1000));
        let mut history = DrawingHistory::new();
        history.append(stroke(700.0, 20.0, 800.0, 60.0));
        assert_eq!(
            trim(&history, Some(placement)),
            IntRect::from_ltrb(250, 0, 810, 1000)
        );
    }
    #[test]
    fn buffer_suppressed_on_image_edge() {
        // Content reaching exactly the image edge gets no buffer, comparisons are non-strict.
        let placement = BackgroundPlacement::fit([1000, 1000], [500, 1000]);
        let mut history = DrawingHistory::new();
        history.append(stroke(250.0, 0.0, 750.0, 10.0));
        assert_eq!(
            trim(&history, Some(placement)),
            IntRect::from_ltrb(250, 0, 750, 1000)
        );
        // One pixel past the left edge: buffered on the left only.
        history.append(stroke(249.0, 0.0, 260.0, 10.0));
        assert_eq!(
            trim(&history, Some(placement)),
            IntRect::from_ltrb(239, 0, 750, 1000)
        );
    }
    #[test]
    fn truncates_toward_zero() {
        let mut history = DrawingHistory::new();
        history.append(stroke(100.9, 100.9, 200.9, 200.9));
        assert_eq!(trim(&history, None), IntRect::from_ltrb(90, 90, 210, 210));
    }
}

//! # Drawing surface
//!
//! Turns pointer input into [`Operation`]s and keeps a [`Canvas`] in sync with the [`DrawingHistory`].
//!
//! Every change to history is followed by a full redraw: clear to the base color, paint the background
//! if there is one, then replay. Input is a simple per-gesture state machine, `begin` → `move_to`* →
//! `end`, interpreted according to the current [`Mode`].

use std::sync::Arc;

use crate::{
    background::Background,
    canvas::Canvas,
    color::Color,
    history::{DrawingHistory, EmptyHistoryError},
    operation::{EmojiOperation, FilledScreen, Operation, OperationError, StrokeOperation, TextOperation},
    path::{exceeds_tolerance, PathSmoother, StrokePath},
    style::{PaintState, Style},
    text::{FixedAdvance, TextMetrics},
    trim::{TrimBox, TrimSettings},
};

#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Default, strum::EnumString, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    /// Freehand strokes, long press floods the surface.
    #[default]
    Sketch,
    /// Input belongs to a text editor elsewhere, the surface ignores it.
    Text,
    /// Each gesture places the chosen emoji.
    Emoji,
}

/// Notifications for whoever hosts the surface. All methods default to doing nothing.
pub trait SurfaceListener {
    /// History went from empty to non-empty.
    fn drawing_added(&mut self) {}
    /// History went from non-empty to empty.
    fn drawing_cleared(&mut self) {}
    /// After undoing text, the text now current. Lets an editor pick it back up.
    fn text_changed(&mut self, _text: &TextOperation) {}
    /// After undoing text, no visible text remains.
    fn text_removed(&mut self) {}
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceSettings {
    /// Minimum pointer travel on either axis, in pixels, before a move counts.
    pub touch_tolerance: f32,
    /// What the surface is cleared to before each replay.
    pub base_color: Color,
    pub trim: TrimSettings,
}
impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            touch_tolerance: 2.0,
            base_color: Color::WHITE,
            trim: TrimSettings::default(),
        }
    }
}

#[derive(Debug)]
enum Capture {
    Idle,
    Sketching(PathSmoother),
    PlacingEmoji {
        /// Baseline origin of the glyph, offset from the pointer to center it.
        anchor: [f32; 2],
        /// Last accepted pointer position.
        pointer: [f32; 2],
    },
}

/// The gesture currently underway, for live preview on top of the canvas.
#[derive(Debug, Clone, Copy)]
pub enum InProgress<'a> {
    Stroke {
        path: &'a StrokePath,
        style: &'a Style,
    },
    Emoji {
        text: &'a str,
        anchor: [f32; 2],
        style: &'a Style,
    },
}

pub struct DrawingSurface<C> {
    history: DrawingHistory,
    /// Absent until the host knows its size, and again after teardown.
    canvas: Option<C>,
    background: Option<Background>,
    paint: PaintState,
    mode: Mode,
    settings: SurfaceSettings,
    metrics: Box<dyn TextMetrics>,
    listener: Option<Box<dyn SurfaceListener>>,
    painted_on: bool,
    capture: Capture,
}
impl<C: Canvas> DrawingSurface<C> {
    #[must_use]
    pub fn new(settings: SurfaceSettings, paint: PaintState) -> Self {
        Self {
            history: DrawingHistory::new(),
            canvas: None,
            background: None,
            paint,
            mode: Mode::default(),
            settings,
            metrics: Box::new(FixedAdvance::default()),
            listener: None,
            painted_on: false,
            capture: Capture::Idle,
        }
    }
    /// Measures text boxes for the trim box. Should agree with whatever rendered them.
    #[must_use]
    pub fn with_metrics(self, metrics: Box<dyn TextMetrics>) -> Self {
        Self { metrics, ..self }
    }
    pub fn set_listener(&mut self, listener: impl SurfaceListener + 'static) {
        self.listener = Some(Box::new(listener));
    }
    #[must_use]
    pub fn history(&self) -> &DrawingHistory {
        &self.history
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
    #[must_use]
    pub fn canvas(&self) -> Option<&C> {
        self.canvas.as_ref()
    }
    #[must_use]
    pub fn settings(&self) -> &SurfaceSettings {
        &self.settings
    }
    /// Install a (new) canvas, as when the host is resized, and repaint it from history.
    pub fn attach(&mut self, canvas: C) {
        self.canvas = Some(canvas);
        self.redraw();
    }
    /// Tear down, handing back the canvas. History is discarded, notifying the listener if
    /// anything had been drawn.
    pub fn detach(&mut self) -> Option<C> {
        self.history.clear();
        self.capture = Capture::Idle;
        self.background = None;
        self.painted_on(false);
        self.canvas.take()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }
    #[must_use]
    pub fn paint(&self) -> &PaintState {
        &self.paint
    }
    pub fn set_color(&mut self, color: Color) {
        self.paint.set_color(color);
    }
    pub fn set_stroke_width(&mut self, width: f32) {
        self.paint.set_stroke_width(width);
    }
    /// Choose an emoji and switch to [`Mode::Emoji`].
    pub fn set_emoji(&mut self, emoji: impl Into<String>, size: f32) {
        self.paint.set_emoji(emoji.into(), size);
        self.mode = Mode::Emoji;
    }
    pub fn set_text_size(&mut self, size: f32) {
        self.paint.set_text_size(size);
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = Some(background);
        if self.canvas.is_some() {
            self.redraw();
        }
    }
    pub fn remove_background(&mut self) {
        if self.background.take().is_some() && self.canvas.is_some() {
            self.redraw();
        }
    }
    #[must_use]
    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    /// Pointer input is dropped in text mode, without a canvas, and when drawing the base color
    /// onto a blank surface (which could never show).
    fn accepts_input(&self) -> bool {
        if self.mode == Mode::Text || self.canvas.is_none() {
            return false;
        }
        !(self.background.is_none()
            && self.history.is_empty()
            && self.paint.stroke.color == self.settings.base_color)
    }
    fn finite_input(x: f32, y: f32) -> bool {
        if x.is_finite() && y.is_finite() {
            true
        } else {
            log::warn!("ignoring non-finite pointer position ({x}, {y})");
            false
        }
    }
    /// Pointer down.
    pub fn begin(&mut self, x: f32, y: f32) {
        if !self.accepts_input() || !Self::finite_input(x, y) {
            return;
        }
        self.capture = match self.mode {
            Mode::Sketch => Capture::Sketching(PathSmoother::begin(
                [x, y],
                self.settings.touch_tolerance,
            )),
            Mode::Emoji if self.paint.emoji_text.is_some() => Capture::PlacingEmoji {
                anchor: self.emoji_anchor(x, y),
                pointer: [x, y],
            },
            Mode::Emoji => {
                log::warn!("emoji mode without an emoji, ignoring gesture");
                Capture::Idle
            }
            Mode::Text => Capture::Idle,
        };
    }
    /// Pointer moved. Ignored unless it travelled at least the touch tolerance.
    pub fn move_to(&mut self, x: f32, y: f32) {
        if !self.accepts_input() || !Self::finite_input(x, y) {
            return;
        }
        let anchor_for_move = self.emoji_anchor(x, y);
        match &mut self.capture {
            Capture::Idle => (),
            Capture::Sketching(smoother) => {
                smoother.push([x, y]);
            }
            Capture::PlacingEmoji { anchor, pointer } => {
                if exceeds_tolerance(*pointer, [x, y], self.settings.touch_tolerance) {
                    *anchor = anchor_for_move;
                    *pointer = [x, y];
                }
            }
        }
    }
    /// Pointer up. Commits the gesture, if it amounted to anything.
    pub fn end(&mut self) {
        if !self.accepts_input() {
            self.capture = Capture::Idle;
            return;
        }
        let operation: Result<Option<Operation>, OperationError> =
            match std::mem::replace(&mut self.capture, Capture::Idle) {
                Capture::Idle => Ok(None),
                // A tap without movement draws nothing.
                Capture::Sketching(smoother) if !smoother.moved() => Ok(None),
                Capture::Sketching(smoother) => {
                    StrokeOperation::new(smoother.finish(), self.paint.stroke)
                        .map(|stroke| Some(stroke.into()))
                }
                Capture::PlacingEmoji { anchor: [x, y], .. } => {
                    let text = self.paint.emoji_text.clone().unwrap_or_default();
                    EmojiOperation::new(text, x, y, self.paint.emoji)
                        .map(|emoji| Some(emoji.into()))
                }
            };
        match operation {
            Ok(Some(operation)) => self.push(operation),
            Ok(None) => (),
            Err(e) => log::warn!("dropping gesture: {e}"),
        }
    }
    /// Flood the whole surface with the stroke color. Sketch mode only, and never over a background.
    pub fn long_press(&mut self) {
        if self.mode != Mode::Sketch || self.background.is_some() {
            return;
        }
        let Some([width, height]) = self.canvas.as_ref().map(|canvas| canvas.size()) else {
            return;
        };
        match FilledScreen::new(width as f32, height as f32, self.paint.stroke) {
            Ok(fill) => self.push(fill),
            Err(e) => log::warn!("can't fill the surface: {e}"),
        }
    }
    fn emoji_anchor(&self, x: f32, y: f32) -> [f32; 2] {
        [x - self.paint.emoji.font_size / 2.0, y]
    }
    /// The gesture underway, if any.
    #[must_use]
    pub fn in_progress(&self) -> Option<InProgress<'_>> {
        match &self.capture {
            Capture::Idle => None,
            Capture::Sketching(smoother) => Some(InProgress::Stroke {
                path: smoother.path(),
                style: &self.paint.stroke,
            }),
            Capture::PlacingEmoji { anchor, .. } => Some(InProgress::Emoji {
                text: self.paint.emoji_text.as_deref().unwrap_or_default(),
                anchor: *anchor,
                style: &self.paint.emoji,
            }),
        }
    }

    /// Commit a text box rendered elsewhere. It replaces any text already on the surface.
    pub fn draw_text_bitmap(
        &mut self,
        bitmap: tiny_skia::Pixmap,
        x: f32,
        y: f32,
        text: impl Into<String>,
        scale: f32,
    ) -> Result<(), OperationError> {
        let text =
            TextOperation::visible(Arc::new(bitmap), x, y, text.into(), scale, self.paint.text)?;
        self.push(text);
        Ok(())
    }
    /// Commit "no text", removing the current text box in an undoable way.
    pub fn erase_text(&mut self) {
        self.push(TextOperation::erased());
    }
    /// Temporarily take the current text off the surface, e.g. while it is being edited.
    pub fn hide_text(&mut self) {
        self.history.hide_text();
        self.redraw();
    }
    pub fn show_text(&mut self) {
        self.history.show_text();
        self.redraw();
    }

    /// Drop the newest operation. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let last = match self.history.undo() {
            Ok(last) => last,
            Err(EmptyHistoryError) => return false,
        };
        log::debug!("undo, {} operations remain", self.history.len());
        if last.text().is_some() {
            if let Some(listener) = self.listener.as_deref_mut() {
                match self.history.last_text() {
                    Some(text) if text.is_visible() => listener.text_changed(text),
                    _ => listener.text_removed(),
                }
            }
        }
        self.redraw();
        true
    }
    /// Discard everything drawn.
    pub fn reset(&mut self) {
        log::debug!("reset, discarding {} operations", self.history.len());
        self.history.clear();
        self.capture = Capture::Idle;
        self.redraw();
    }

    /// Crop rectangle for exporting, or `None` without a canvas to measure.
    #[must_use]
    pub fn trim_box(&self) -> Option<TrimBox> {
        let size = self.canvas.as_ref()?.size();
        let placement = self
            .background
            .as_ref()
            .map(|background| background.placement(size));
        Some(crate::trim::trim_box(
            &self.history,
            size,
            placement,
            &self.settings.trim,
            self.metrics.as_ref(),
        ))
    }

    fn push(&mut self, operation: impl Into<Operation>) {
        let operation = operation.into();
        log::trace!("appending {operation:?}");
        self.history.append(operation);
        self.redraw();
    }
    fn redraw(&mut self) {
        self.painted_on(!self.history.is_empty());
        debug_assert!(self.canvas.is_some(), "redraw without a canvas");
        let Some(canvas) = self.canvas.as_mut() else {
            log::warn!(
                "redraw without a canvas, {} operations not painted",
                self.history.len()
            );
            return;
        };
        canvas.clear(self.settings.base_color);
        if let Some(background) = &self.background {
            canvas.draw_background(background);
        }
        self.history.replay(canvas);
        canvas.present();
    }
    fn painted_on(&mut self, painted_on: bool) {
        if self.painted_on == painted_on {
            return;
        }
        self.painted_on = painted_on;
        if let Some(listener) = self.listener.as_deref_mut() {
            if painted_on {
                listener.drawing_added();
            } else {
                listener.drawing_cleared();
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::{cell::RefCell, rc::Rc};

    use super::{DrawingSurface, Mode, SurfaceListener, SurfaceSettings};
    use crate::{
        background::Background,
        canvas::testing::{Call, RecordingCanvas},
        color::Color,
        operation::{Operation, TextOperation},
        style::PaintState,
        util::{IntRect, Rect},
    };

    #[derive(Clone, PartialEq, Debug)]
    enum Event {
        Added,
        Cleared,
        TextChanged(String),
        TextRemoved,
    }
    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Event>>>);
    impl Recorder {
        fn take(&self) -> Vec<Event> {
            std::mem::take(&mut *self.0.borrow_mut())
        }
    }
    impl SurfaceListener for Recorder {
        fn drawing_added(&mut self) {
            self.0.borrow_mut().push(Event::Added);
        }
        fn drawing_cleared(&mut self) {
            self.0.borrow_mut().push(Event::Cleared);
        }
        fn text_changed(&mut self, text: &TextOperation) {
            self.0
                .borrow_mut()
                .push(Event::TextChanged(text.text().to_owned()));
        }
        fn text_removed(&mut self) {
            self.0.borrow_mut().push(Event::TextRemoved);
        }
    }

    fn red() -> Color {
        Color::from_rgba8(255, 0, 0, 255)
    }
    fn blue() -> Color {
        Color::from_rgba8(0, 0, 255, 255)
    }
    fn surface() -> (DrawingSurface<RecordingCanvas>, Recorder) {
        let mut surface = DrawingSurface::new(SurfaceSettings::default(), PaintState::default());
        let recorder = Recorder::default();
        surface.set_listener(recorder.clone());
        surface.attach(RecordingCanvas::new(1000, 800));
        (surface, recorder)
    }
    fn drag(surface: &mut DrawingSurface<RecordingCanvas>, points: &[[f32; 2]]) {
        let [x, y] = points[0];
        surface.begin(x, y);
        for &[x, y] in &points[1..] {
            surface.move_to(x, y);
        }
        surface.end();
    }
    fn frame(surface: &DrawingSurface<RecordingCanvas>) -> Vec<Call> {
        surface.canvas().unwrap().frame().to_vec()
    }
    fn text_bitmap(surface: &mut DrawingSurface<RecordingCanvas>, text: &str) {
        let bitmap = tiny_skia::Pixmap::new(8, 8).unwrap();
        surface
            .draw_text_bitmap(bitmap, 10.0, 20.0, text, 1.5)
            .unwrap();
    }

    #[test]
    fn tap_draws_nothing() {
        let (mut surface, recorder) = surface();
        drag(&mut surface, &[[10.0, 10.0]]);
        assert!(surface.is_empty());
        // Under tolerance on both axes is still a tap.
        drag(&mut surface, &[[10.0, 10.0], [11.0, 11.5]]);
        assert!(surface.is_empty());
        assert!(recorder.take().is_empty());
        assert!(surface.in_progress().is_none());
    }
    #[test]
    fn drag_records_stroke() {
        let (mut surface, recorder) = surface();
        drag(&mut surface, &[[10.0, 10.0], [50.0, 20.0], [90.0, 60.0]]);
        assert_eq!(surface.history().len(), 1);
        let stroke = surface.history().iter().next().and_then(Operation::stroke).unwrap();
        assert_eq!(stroke.bounds(), Rect::from_ltrb(10.0, 10.0, 90.0, 60.0));
        assert_eq!(recorder.take(), [Event::Added]);
        // Redraw clears to the base color and replays.
        assert_eq!(frame(&surface), [Call::Stroke(Color::BLACK)]);
        assert_eq!(surface.canvas().unwrap().calls.last(), Some(&Call::Present));
        assert!(surface
            .canvas()
            .unwrap()
            .calls
            .contains(&Call::Clear(Color::WHITE)));
    }
    #[test]
    fn style_is_snapshotted() {
        let (mut surface, _) = surface();
        surface.set_color(red());
        drag(&mut surface, &[[10.0, 10.0], [50.0, 50.0]]);
        surface.set_color(blue());
        surface.set_stroke_width(40.0);
        drag(&mut surface, &[[10.0, 50.0], [50.0, 10.0]]);
        assert_eq!(frame(&surface), [Call::Stroke(red()), Call::Stroke(blue())]);
        let first = surface.history().iter().next().and_then(Operation::stroke).unwrap();
        assert_eq!(first.style().width, 8.0);
    }
    #[test]
    fn preview_while_dragging() {
        let (mut surface, _) = surface();
        surface.begin(0.0, 0.0);
        surface.move_to(10.0, 10.0);
        assert!(matches!(
            surface.in_progress(),
            Some(super::InProgress::Stroke { path, .. }) if path.segments().len() == 2
        ));
        surface.end();
        assert!(surface.in_progress().is_none());
    }
    #[test]
    fn emoji_placement() {
        let (mut surface, _) = surface();
        surface.set_emoji("x", 40.0);
        assert_eq!(surface.mode(), Mode::Emoji);
        surface.begin(100.0, 100.0);
        surface.move_to(101.0, 101.0);
        surface.move_to(300.0, 200.0);
        surface.end();
        let emoji = surface.history().iter().next().and_then(Operation::emoji).unwrap();
        // Centered horizontally on the pointer.
        assert_eq!(emoji.position(), [280.0, 200.0]);
        assert_eq!(emoji.style().font_size, 40.0);
        // A tap places one too.
        drag(&mut surface, &[[10.0, 10.0]]);
        assert_eq!(surface.history().len(), 2);
        assert_eq!(frame(&surface), [Call::Emoji("x".into()), Call::Emoji("x".into())]);
    }
    #[test]
    fn emoji_mode_needs_an_emoji() {
        let (mut surface, _) = surface();
        surface.set_mode(Mode::Emoji);
        drag(&mut surface, &[[10.0, 10.0], [50.0, 50.0]]);
        assert!(surface.is_empty());
    }
    #[test]
    fn text_mode_ignores_input() {
        let (mut surface, _) = surface();
        surface.set_mode(Mode::Text);
        drag(&mut surface, &[[10.0, 10.0], [50.0, 50.0]]);
        surface.long_press();
        assert!(surface.is_empty());
    }
    #[test]
    fn white_on_blank_ignored() {
        let (mut surface, _) = surface();
        surface.set_color(Color::WHITE);
        drag(&mut surface, &[[10.0, 10.0], [50.0, 50.0]]);
        assert!(surface.is_empty());
        // Once something is there, white is a real eraser-ish color.
        surface.set_color(red());
        drag(&mut surface, &[[10.0, 10.0], [50.0, 50.0]]);
        surface.set_color(Color::WHITE);
        drag(&mut surface, &[[10.0, 10.0], [50.0, 50.0]]);
        assert_eq!(surface.history().len(), 2);
    }
    #[test]
    fn long_press_fills() {
        let (mut surface, recorder) = surface();
        surface.set_color(red());
        surface.long_press();
        let fill = surface
            .history()
            .iter()
            .next()
            .and_then(Operation::filled_screen)
            .unwrap();
        assert_eq!(fill.size(), [1000.0, 800.0]);
        assert_eq!(frame(&surface), [Call::Fill(red())]);
        assert_eq!(recorder.take(), [Event::Added]);
        assert_eq!(surface.trim_box(), Some(IntRect::from_ltrb(0, 0, 1000, 800)));
    }
    #[test]
    fn long_press_blocked_by_background() {
        let (mut surface, _) = surface();
        let background = Background::from_rgba8(2, 1, vec![0; 8]).unwrap();
        surface.set_background(background);
        assert_eq!(frame(&surface), [Call::Background]);
        surface.long_press();
        assert!(surface.is_empty());
        // White on a photo is fine.
        surface.set_color(Color::WHITE);
        drag(&mut surface, &[[10.0, 10.0], [50.0, 50.0]]);
        assert_eq!(frame(&surface), [Call::Background, Call::Stroke(Color::WHITE)]);
        surface.remove_background();
        assert_eq!(frame(&surface), [Call::Stroke(Color::WHITE)]);
    }
    #[test]
    fn painted_on_is_one_shot() {
        let (mut surface, recorder) = surface();
        drag(&mut surface, &[[10.0, 10.0], [50.0, 50.0]]);
        drag(&mut surface, &[[10.0, 10.0], [50.0, 50.0]]);
        assert_eq!(recorder.take(), [Event::Added]);
        assert!(surface.undo());
        assert!(recorder.take().is_empty());
        assert!(surface.undo());
        assert_eq!(recorder.take(), [Event::Cleared]);
        assert!(!surface.undo());
        assert!(recorder.take().is_empty());
    }
    #[test]
    fn undo_text_notifies() {
        let (mut surface, recorder) = surface();
        text_bitmap(&mut surface, "first");
        text_bitmap(&mut surface, "second");
        assert_eq!(surface.canvas().unwrap().texts(), ["second"]);
        recorder.take();

        assert!(surface.undo());
        assert_eq!(recorder.take(), [Event::TextChanged("first".into())]);
        assert_eq!(surface.canvas().unwrap().texts(), ["first"]);
        assert!(surface.undo());
        assert_eq!(recorder.take(), [Event::TextRemoved, Event::Cleared]);
    }
    #[test]
    fn undo_erased_brings_text_back() {
        let (mut surface, recorder) = surface();
        text_bitmap(&mut surface, "kept");
        surface.erase_text();
        assert!(surface.canvas().unwrap().texts().is_empty());
        recorder.take();
        assert!(surface.undo());
        assert_eq!(recorder.take(), [Event::TextChanged("kept".into())]);
        let last = surface.history().last_text().unwrap();
        assert_eq!((last.position(), last.scale()), ([10.0, 20.0], 1.5));
    }
    #[test]
    fn hide_and_show() {
        let (mut surface, _) = surface();
        text_bitmap(&mut surface, "A");
        surface.hide_text();
        assert!(surface.canvas().unwrap().texts().is_empty());
        surface.show_text();
        assert_eq!(surface.canvas().unwrap().texts(), ["A"]);
        assert_eq!(surface.history().len(), 1);
    }
    #[test]
    fn reset_and_detach() {
        let (mut surface, recorder) = surface();
        drag(&mut surface, &[[10.0, 10.0], [50.0, 50.0]]);
        surface.reset();
        assert!(surface.is_empty());
        assert_eq!(recorder.take(), [Event::Added, Event::Cleared]);
        assert!(frame(&surface).is_empty());

        drag(&mut surface, &[[10.0, 10.0], [50.0, 50.0]]);
        recorder.take();
        let canvas = surface.detach().unwrap();
        assert_eq!(canvas.size, [1000, 800]);
        assert!(surface.is_empty());
        // Teardown notifies right away, not on the next attach.
        assert_eq!(recorder.take(), [Event::Cleared]);
        assert!(surface.canvas().is_none());
        assert!(surface.trim_box().is_none());
        // Input without a canvas goes nowhere.
        drag(&mut surface, &[[10.0, 10.0], [50.0, 50.0]]);
        assert!(surface.is_empty());
        surface.attach(canvas);
        assert!(recorder.take().is_empty());
        // Detaching a blank surface has nothing to report.
        surface.detach();
        assert!(recorder.take().is_empty());
    }
    #[test]
    fn non_finite_input_ignored() {
        let (mut surface, _) = surface();
        drag(&mut surface, &[[10.0, 10.0], [f32::NAN, 50.0]]);
        assert!(surface.is_empty());
        drag(&mut surface, &[[f32::INFINITY, 10.0], [20.0, 50.0]]);
        assert!(surface.is_empty());
        // Bad samples mid-gesture are skipped, the rest still draws.
        drag(&mut surface, &[[10.0, 10.0], [f32::NAN, 50.0], [30.0, 50.0]]);
        let stroke = surface.history().iter().next().and_then(Operation::stroke).unwrap();
        assert_eq!(stroke.bounds(), Rect::from_ltrb(10.0, 10.0, 30.0, 50.0));
        assert!(stroke.path().to_skia().is_some());
        assert_eq!(frame(&surface), [Call::Stroke(Color::BLACK)]);
    }
    #[test]
    fn removing_background_restores_blank_rules() {
        let (mut surface, _) = surface();
        let background = Background::from_rgba8(2, 1, vec![0; 8]).unwrap();
        surface.set_background(background);
        surface.set_color(Color::WHITE);
        surface.long_press();
        assert!(surface.is_empty());
        surface.remove_background();
        assert!(surface.background().is_none());
        // White on a blank surface is ignored again.
        drag(&mut surface, &[[10.0, 10.0], [50.0, 50.0]]);
        assert!(surface.is_empty());
        // And long press works again.
        surface.set_color(red());
        surface.long_press();
        assert_eq!(frame(&surface), [Call::Fill(red())]);
        // The image no longer bounds the trim box.
        assert_eq!(surface.trim_box(), Some(IntRect::from_ltrb(0, 0, 1000, 800)));
    }
    #[test]
    fn trim_box_through_surface() {
        let (mut surface, _) = surface();
        drag(&mut surface, &[[100.0, 100.0], [200.0, 200.0]]);
        // Default trim buffer is 24.
        assert_eq!(
            surface.trim_box(),
            Some(IntRect::from_ltrb(76, 76, 224, 224))
        );
    }
}

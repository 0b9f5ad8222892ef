//! # Stroke paths
//!
//! Freehand input is smoothed into a chain of quadratic segments: every accepted sample becomes the
//! control point of the next segment, which ends halfway between it and the following sample.
//! Only the last sample needs to be remembered.

use crate::util::Rect;

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Segment {
    MoveTo([f32; 2]),
    QuadTo { control: [f32; 2], to: [f32; 2] },
    LineTo([f32; 2]),
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct StrokePath {
    segments: Vec<Segment>,
}
impl StrokePath {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
    pub fn move_to(&mut self, point: [f32; 2]) {
        self.segments.push(Segment::MoveTo(point));
    }
    pub fn quad_to(&mut self, control: [f32; 2], to: [f32; 2]) {
        self.segments.push(Segment::QuadTo { control, to });
    }
    pub fn line_to(&mut self, point: [f32; 2]) {
        self.segments.push(Segment::LineTo(point));
    }
    pub fn reset(&mut self) {
        self.segments.clear();
    }
    /// Every point of the path, control points included.
    pub fn points(&self) -> impl Iterator<Item = [f32; 2]> + '_ {
        self.segments.iter().flat_map(|segment| {
            let (a, b) = match *segment {
                Segment::MoveTo(p) | Segment::LineTo(p) => (p, None),
                Segment::QuadTo { control, to } => (control, Some(to)),
            };
            std::iter::once(a).chain(b)
        })
    }
    /// Bounds of all points *including* control points, which is always a superset of the curve.
    /// `None` for an empty path.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        Rect::from_points(self.points())
    }
    /// Convert for painting. `None` if the path has no drawable segments.
    #[must_use]
    pub fn to_skia(&self) -> Option<tiny_skia::Path> {
        let mut builder =
            tiny_skia::PathBuilder::with_capacity(self.segments.len(), self.segments.len() * 2);
        for segment in &self.segments {
            match *segment {
                Segment::MoveTo([x, y]) => builder.move_to(x, y),
                Segment::LineTo([x, y]) => builder.line_to(x, y),
                Segment::QuadTo {
                    control: [cx, cy],
                    to: [x, y],
                } => builder.quad_to(cx, cy, x, y),
            }
        }
        builder.finish()
    }
}

/// In-progress freehand stroke.
#[derive(Clone, Debug)]
pub struct PathSmoother {
    path: StrokePath,
    last: [f32; 2],
    tolerance: f32,
    moved: bool,
}
impl PathSmoother {
    #[must_use]
    pub fn begin(point: [f32; 2], tolerance: f32) -> Self {
        let mut path = StrokePath::new();
        path.move_to(point);
        Self {
            path,
            last: point,
            tolerance,
            moved: false,
        }
    }
    /// Extend the stroke towards `point`. Returns false, changing nothing, if the point
    /// is within the touch tolerance of the last accepted sample on both axes.
    pub fn push(&mut self, point: [f32; 2]) -> bool {
        let finite = point.iter().all(|v| v.is_finite());
        if !finite || !exceeds_tolerance(self.last, point, self.tolerance) {
            return false;
        }
        let [lx, ly] = self.last;
        let [x, y] = point;
        self.path.quad_to(self.last, [(x + lx) / 2.0, (y + ly) / 2.0]);
        self.last = point;
        self.moved = true;
        true
    }
    /// Was any move accepted since [`Self::begin`]?
    #[must_use]
    pub fn moved(&self) -> bool {
        self.moved
    }
    #[must_use]
    pub fn last(&self) -> [f32; 2] {
        self.last
    }
    /// The path so far, for previewing.
    #[must_use]
    pub fn path(&self) -> &StrokePath {
        &self.path
    }
    /// Close the stroke with a line to the last sample.
    #[must_use]
    pub fn finish(mut self) -> StrokePath {
        self.path.line_to(self.last);
        self.path
    }
}

/// `|dx| >= tolerance or |dy| >= tolerance`
#[must_use]
pub fn exceeds_tolerance(from: [f32; 2], to: [f32; 2], tolerance: f32) -> bool {
    (to[0] - from[0]).abs() >= tolerance || (to[1] - from[1]).abs() >= tolerance
}

//! Utility types, used throughout the crate.

/// A float which is non-NaN and non-infinite.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
#[repr(transparent)]
pub struct FiniteF32(f32);
impl FiniteF32 {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);
    pub fn new(val: f32) -> Result<Self, FiniteF32Error> {
        if val.is_finite() {
            Ok(Self(val))
        } else {
            Err(FiniteF32Error::NotFinite)
        }
    }
    /// Clamp into `[0, 1]`. Non-finite values are rejected rather than saturated.
    pub fn new_unit(val: f32) -> Result<Self, FiniteF32Error> {
        Self::new(val).map(|v| Self(v.0.clamp(0.0, 1.0)))
    }
    #[must_use]
    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for FiniteF32 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f32> for FiniteF32 {
    type Error = FiniteF32Error;
    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
impl From<FiniteF32> for f32 {
    fn from(value: FiniteF32) -> Self {
        value.get()
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FiniteF32Error {
    #[error("not finite")]
    NotFinite,
}

// No component is ever NaN, so PartialEq can act like Eq
impl Eq for FiniteF32 {}
// Taking partial ord logic to impl Ord because of struct invariants.
#[allow(clippy::derive_ord_xor_partial_ord)]
impl Ord for FiniteF32 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Never None, both sides are non-NaN.
        self.partial_cmp(other)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}
impl std::hash::Hash for FiniteF32 {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.to_bits());
    }
}

/// Axis-aligned rectangle in surface space. `left <= right` and `top <= bottom` for
/// any rectangle built from points, but not enforced.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}
impl Rect {
    #[must_use]
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
    /// Smallest rect containing every point, or `None` if there are no points.
    pub fn from_points(points: impl IntoIterator<Item = [f32; 2]>) -> Option<Self> {
        let mut points = points.into_iter();
        let [x, y] = points.next()?;
        let mut rect = Self::from_ltrb(x, y, x, y);
        for [x, y] in points {
            rect.left = rect.left.min(x);
            rect.top = rect.top.min(y);
            rect.right = rect.right.max(x);
            rect.bottom = rect.bottom.max(y);
        }
        Some(rect)
    }
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }
    #[must_use]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Axis-aligned rectangle in whole pixels.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct IntRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}
impl IntRect {
    #[must_use]
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
    /// `(0, 0, width, height)`
    #[must_use]
    pub fn from_size([width, height]: [u32; 2]) -> Self {
        Self::from_ltrb(0, 0, saturate(width), saturate(height))
    }
    #[must_use]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }
    #[must_use]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
    /// True if the rect encloses no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

/// `u32 -> i32`, saturating at `i32::MAX`.
#[must_use]
pub fn saturate(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

use crate::util::{FiniteF32, FiniteF32Error};

/// A straight-alpha sRGB color, every channel in `[0, 1]`.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Color([FiniteF32; 4]);
impl Color {
    pub const TRANSPARENT: Self = Self([FiniteF32::ZERO; 4]);
    pub const WHITE: Self = Self([FiniteF32::ONE; 4]);
    pub const BLACK: Self = Self([
        FiniteF32::ZERO,
        FiniteF32::ZERO,
        FiniteF32::ZERO,
        FiniteF32::ONE,
    ]);
    /// Create a color from straight channels, clamping each into `[0, 1]`.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Result<Self, FiniteF32Error> {
        Ok(Self([
            FiniteF32::new_unit(r)?,
            FiniteF32::new_unit(g)?,
            FiniteF32::new_unit(b)?,
            FiniteF32::new_unit(a)?,
        ]))
    }
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        // u8 / 255 is always finite and in range.
        let unit = |c: u8| FiniteF32::new_unit(f32::from(c) / 255.0).unwrap_or(FiniteF32::ZERO);
        Self([unit(r), unit(g), unit(b), unit(a)])
    }
    /// Parse `#rrggbb` or `#rrggbbaa`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !matches!(hex.len(), 6 | 8) {
            return Err(ColorParseError::Length(hex.len()));
        }
        let channel = |idx: usize| -> Result<u8, ColorParseError> {
            hex.get(idx * 2..idx * 2 + 2)
                .ok_or(ColorParseError::Digits)
                .and_then(|digits| {
                    u8::from_str_radix(digits, 16).map_err(|_| ColorParseError::Digits)
                })
        };
        let alpha = if hex.len() == 8 { channel(3)? } else { 255 };
        Ok(Self::from_rgba8(channel(0)?, channel(1)?, channel(2)?, alpha))
    }
    #[must_use]
    pub fn as_array(&self) -> [f32; 4] {
        [
            self.0[0].get(),
            self.0[1].get(),
            self.0[2].get(),
            self.0[3].get(),
        ]
    }
    #[must_use]
    pub fn alpha(&self) -> f32 {
        self.0[3].get()
    }
    #[must_use]
    pub fn to_skia(self) -> tiny_skia::Color {
        let [r, g, b, a] = self.as_array();
        // Channels are finite and in [0, 1], which is all tiny-skia asks for.
        tiny_skia::Color::from_rgba(r, g, b, a).unwrap_or(tiny_skia::Color::BLACK)
    }
}
impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
impl std::str::FromStr for Color {
    type Err = ColorParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected 6 or 8 hex digits, found {0}")]
    Length(usize),
    #[error("invalid hex digits")]
    Digits,
}

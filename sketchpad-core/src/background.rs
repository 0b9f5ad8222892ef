//! # Background image
//!
//! An optional photo painted under the drawing. It is aspect-fit to the surface: landscape images span
//! the full width and are letterboxed, portrait (and square) images span the full height and are
//! pillarboxed.

use std::sync::Arc;

use crate::util::{saturate, IntRect};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BackgroundError {
    #[error("image has zero width or height")]
    Empty,
    #[error("expected {expected} bytes of RGBA8, found {found}")]
    Length { expected: usize, found: usize },
}

#[derive(Clone, Debug)]
pub struct Background {
    image: Arc<tiny_skia::Pixmap>,
}
impl Background {
    #[must_use]
    pub fn new(image: Arc<tiny_skia::Pixmap>) -> Self {
        Self { image }
    }
    /// From straight-alpha RGBA8 rows, as image decoders hand them out.
    pub fn from_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> Result<Self, BackgroundError> {
        let size = tiny_skia::IntSize::from_wh(width, height).ok_or(BackgroundError::Empty)?;
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(BackgroundError::Length {
                expected,
                found: data.len(),
            });
        }
        for pixel in data.chunks_exact_mut(4) {
            let alpha = u16::from(pixel[3]);
            for channel in &mut pixel[..3] {
                // Round-to-nearest premultiply, never exceeds alpha.
                *channel = ((u16::from(*channel) * alpha + 127) / 255) as u8;
            }
        }
        let image = tiny_skia::Pixmap::from_vec(data, size).ok_or(BackgroundError::Empty)?;
        Ok(Self::new(Arc::new(image)))
    }
    #[must_use]
    pub fn image(&self) -> &tiny_skia::Pixmap {
        &self.image
    }
    #[must_use]
    pub fn size(&self) -> [u32; 2] {
        [self.image.width(), self.image.height()]
    }
    #[must_use]
    pub fn is_landscape(&self) -> bool {
        self.image.width() > self.image.height()
    }
    /// Where the image lands on a surface of the given size.
    #[must_use]
    pub fn placement(&self, surface: [u32; 2]) -> BackgroundPlacement {
        BackgroundPlacement::fit(surface, self.size())
    }
    /// Image space to surface space.
    #[must_use]
    pub fn transform(&self, [width, height]: [u32; 2]) -> tiny_skia::Transform {
        let [image_width, image_height] = self.size();
        let (w, h) = (width as f32, height as f32);
        let (iw, ih) = (image_width as f32, image_height as f32);
        let placement = self.placement([width, height]).image;
        if self.is_landscape() {
            let scale = w / iw;
            tiny_skia::Transform::from_scale(scale, scale).post_translate(0.0, placement.top as f32)
        } else {
            let scale = h / ih;
            tiny_skia::Transform::from_scale(scale, scale).post_translate(placement.left as f32, 0.0)
        }
    }
}

/// The rectangle a background covers on the surface, in whole pixels.
///
/// Along the axis the image spans fully, the rectangle is the whole surface.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct BackgroundPlacement {
    /// Spans the full width, letterboxed vertically.
    pub landscape: bool,
    pub image: IntRect,
}
impl BackgroundPlacement {
    /// Aspect-fit an image of `image` size onto a surface of `surface` size. Edges are truncated to
    /// whole pixels, so they may sit a pixel inside the exact fit.
    #[must_use]
    pub fn fit(surface: [u32; 2], image: [u32; 2]) -> Self {
        let [width, height] = surface.map(saturate);
        let [image_width, image_height] = image;
        if image_width > image_height {
            let ratio = width as f32 / image_width as f32;
            let half_extent = ratio * image_height as f32 / 2.0;
            let mid = (height / 2) as f32;
            Self {
                landscape: true,
                image: IntRect::from_ltrb(
                    0,
                    (mid - half_extent) as i32,
                    width,
                    (mid + half_extent) as i32,
                ),
            }
        } else {
            let ratio = height as f32 / image_height.max(1) as f32;
            let image_width = (image_width as f32 * ratio) as i32;
            Self {
                landscape: false,
                image: IntRect::from_ltrb(
                    width / 2 - image_width / 2,
                    0,
                    width / 2 + image_width / 2,
                    height,
                ),
            }
        }
    }
}

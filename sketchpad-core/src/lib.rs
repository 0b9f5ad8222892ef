//! # sketchpad-core
//!
//! Operation history, replay, and trimming for a finger-painting surface. Rendering targets are
//! abstracted behind [`canvas::Canvas`], with [`raster::Raster`] painting into a CPU pixmap.

pub mod background;
pub mod canvas;
pub mod color;
pub mod history;
pub mod operation;
pub mod path;
pub mod raster;
pub mod style;
pub mod surface;
pub mod text;
pub mod trim;
pub mod util;

pub use color::Color;
pub use history::DrawingHistory;
pub use operation::Operation;
pub use surface::{DrawingSurface, Mode, SurfaceListener, SurfaceSettings};

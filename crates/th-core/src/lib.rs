//! Foundational primitives for sampling surfaces onto raster heatmaps.
//!
//! ## Domain vs. Raster Coordinates
//! Domain coordinates are planar `f64` values where Y increases upward.
//! Raster coordinates are `(px, py)` pixel indices where row 0 is the top of
//! the image, so the highest domain Y maps to the smallest `py`.
//!
//! ## Grid Discretization
//! A [`GridSpec`] couples domain bounds with a positive interval. Raster size is
//! `ceil(span / interval)` per axis while the sampling lattice visits every
//! `min + i * interval` that does not exceed `max`. Both are validated against a
//! maximum dimension before anything is allocated.
//!
//! ## Heat Colors
//! [`heat_color`] is a linear blue-to-red ramp without a green component.
//! Channels are rounded half away from zero.

mod color;
mod error;
mod geom;
mod grid;
mod image;

pub use color::{Rgba8, clamp01, heat_color};
pub use error::Error;
pub use geom::{Bounds2d, Point2d, Point3d, Vec2d};
pub use grid::{DEFAULT_MAX_GRID_DIMENSION, GridSpec, LATTICE_TOLERANCE};
pub use image::Image;

//! Heatmap rasterization of sampled elevations.
//!
//! Every pixel starts as the background color. Each sample is normalized
//! against the elevation range, colored with [`th_core::heat_color`] and
//! written to the pixel its grid cell maps to.
//!
//! Normalization:
//! - `t = clamp((z - z_min) / (z_max - z_min + epsilon), 0, 1)`.
//! - `epsilon` keeps a flat range (`z_min == z_max`) finite; every sample of
//!   a flat surface renders as the low end of the ramp.
//!
//! Samples that map outside the raster (the `max` edge of each axis when the
//! span is an exact multiple of the interval) are discarded.

mod rasterize;

pub use rasterize::{DEFAULT_EPSILON, RasterConfig, normalize, rasterize};

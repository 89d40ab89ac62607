//! Umbrella crate for the `tin-heatmap` workspace.
//!
//! Re-exports the foundational crates and adds [`build_heatmap`], which runs
//! the whole grid-sample-rasterize pipeline for one elevation source.

mod pipeline;

pub use pipeline::{Heatmap, HeatmapConfig, build_heatmap};
pub use th_core::*;
pub use th_export::*;
pub use th_raster::*;
pub use th_sample::*;
pub use th_surface::*;

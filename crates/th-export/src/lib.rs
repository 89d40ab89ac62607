//! Output artifacts for sampled surfaces.
//!
//! - Point records: one `x,y,z` line per sample, three decimals, no header,
//!   in sampler order.
//! - Heatmap: lossless RGBA PNG at the raster's exact size.
//! - Metadata: a pretty-printed JSON summary of one surface run.
//!
//! File names carry the surface name and a local timestamp so repeated runs
//! never overwrite each other.

mod artifacts;
mod writers;

pub use artifacts::{ArtifactNames, RunMeta, sanitize_name, timestamp_now};
pub use writers::{format_point_record, save_heatmap_png, write_json, write_points_csv};

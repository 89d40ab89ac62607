use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;
use serde::Serialize;
use th_core::GridSpec;
use th_sample::SampleSet;

/// Local wall-clock stamp used in artifact names, e.g. `20240131_235959`.
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Replaces every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "surface".to_string()
    } else {
        cleaned
    }
}

/// Paths of the artifacts produced for one surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub points_csv: PathBuf,
    pub heatmap_png: PathBuf,
    pub meta_json: PathBuf,
}

impl ArtifactNames {
    pub fn new(out_dir: &Path, surface_name: &str, stamp: &str) -> Self {
        let base = format!("{}_{stamp}", sanitize_name(surface_name));
        Self {
            points_csv: out_dir.join(format!("{base}_points.csv")),
            heatmap_png: out_dir.join(format!("{base}_heatmap.png")),
            meta_json: out_dir.join(format!("{base}_meta.json")),
        }
    }

    /// Deletes whichever artifacts exist, so a failed export leaves nothing
    /// partial behind.
    pub fn remove_all(&self) {
        for path in [&self.points_csv, &self.heatmap_png, &self.meta_json] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!("could not remove {}: {e}", path.display()),
            }
        }
    }
}

/// Summary written next to the artifacts of one surface.
#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub surface: String,
    pub bounds_min: [f64; 2],
    pub bounds_max: [f64; 2],
    pub interval: f64,
    pub width: usize,
    pub height: usize,
    pub lattice_points: usize,
    pub sample_count: usize,
    pub z_min: f64,
    pub z_max: f64,
    pub points_file: String,
    pub heatmap_file: String,
    pub color_ramp: &'static str,
}

impl RunMeta {
    pub fn new(
        surface: &str,
        grid: &GridSpec,
        samples: &SampleSet,
        names: &ArtifactNames,
    ) -> Self {
        let b = grid.bounds();
        Self {
            surface: surface.to_string(),
            bounds_min: [b.min.x, b.min.y],
            bounds_max: [b.max.x, b.max.y],
            interval: grid.interval(),
            width: grid.width(),
            height: grid.height(),
            lattice_points: samples.queried(),
            sample_count: samples.len(),
            z_min: samples.z_min(),
            z_max: samples.z_max(),
            points_file: file_name(&names.points_csv),
            heatmap_file: file_name(&names.heatmap_png),
            color_ramp: "linear blue (low) to red (high)",
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

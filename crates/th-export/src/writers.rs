use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;
use serde::Serialize;
use th_core::{Image, Rgba8};
use th_sample::Sample;

pub fn format_point_record(s: &Sample) -> String {
    format!("{:.3},{:.3},{:.3}", s.x, s.y, s.z)
}

pub fn write_points_csv(path: &Path, samples: &[Sample]) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for s in samples {
        writeln!(out, "{}", format_point_record(s)).context("writing point record")?;
    }
    out.flush()
        .with_context(|| format!("flushing {}", path.display()))
}

pub fn save_heatmap_png(path: &Path, img: &Image<Rgba8>) -> Result<()> {
    let raw: Vec<u8> = img.data().iter().flat_map(|px| px.to_array()).collect();
    let rgba = RgbaImage::from_raw(img.width() as u32, img.height() as u32, raw)
        .context("constructing RgbaImage from raster")?;
    rgba.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("saving image {}", path.display()))
}

pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

use log::debug;
use th_core::{Error, GridSpec, Image, Rgba8, clamp01, heat_color};
use th_sample::Sample;

pub const DEFAULT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct RasterConfig {
    pub epsilon: f64,
    pub background: Rgba8,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            background: Rgba8::BLACK,
        }
    }
}

/// Maps `z` into `[0, 1]` relative to `[z_min, z_max]`.
pub fn normalize(z: f64, z_min: f64, z_max: f64, epsilon: f64) -> f64 {
    clamp01((z - z_min) / (z_max - z_min + epsilon))
}

/// Paints `samples` onto a `grid.width() x grid.height()` raster.
///
/// Fails with [`Error::EmptyRaster`] when the grid has no pixels and with
/// [`Error::NoSamples`] when `samples` is empty. When two samples land on
/// the same pixel the later one wins.
pub fn rasterize(
    samples: &[Sample],
    grid: &GridSpec,
    z_min: f64,
    z_max: f64,
    cfg: &RasterConfig,
) -> Result<Image<Rgba8>, Error> {
    if !grid.has_pixels() {
        return Err(Error::EmptyRaster {
            width: grid.width(),
            height: grid.height(),
        });
    }
    if samples.is_empty() {
        return Err(Error::NoSamples);
    }

    let mut out = Image::new_fill(grid.width(), grid.height(), cfg.background)?;
    let mut discarded = 0usize;

    for s in samples {
        let Some((px, py)) = grid.pixel_of(s.xy()) else {
            discarded += 1;
            continue;
        };
        let t = normalize(s.z, z_min, z_max, cfg.epsilon);
        if let Some(dst) = out.get_mut(px, py) {
            *dst = heat_color(t);
        }
    }

    debug!(
        "rasterized {} samples into {}x{} ({} outside raster)",
        samples.len() - discarded,
        grid.width(),
        grid.height(),
        discarded
    );
    Ok(out)
}

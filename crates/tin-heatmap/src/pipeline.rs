use log::{debug, warn};
use th_core::{Bounds2d, DEFAULT_MAX_GRID_DIMENSION, Error, GridSpec, Image, Rgba8};
use th_raster::{RasterConfig, rasterize};
use th_sample::{ElevationSource, SampleSet, sample_grid};

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapConfig {
    pub max_grid_dimension: usize,
    pub raster: RasterConfig,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            max_grid_dimension: DEFAULT_MAX_GRID_DIMENSION,
            raster: RasterConfig::default(),
        }
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct Heatmap {
    pub grid: GridSpec,
    pub samples: SampleSet,
    pub image: Image<Rgba8>,
}

impl Heatmap {
    pub fn z_min(&self) -> f64 {
        self.samples.z_min()
    }

    pub fn z_max(&self) -> f64 {
        self.samples.z_max()
    }
}

/// Samples `source` over `bounds` every `interval` units and renders the
/// heatmap.
///
/// All size checks run before the source is queried or any buffer is
/// allocated. An empty sample set is reported as [`Error::NoSamples`].
pub fn build_heatmap<S>(
    bounds: Bounds2d,
    interval: f64,
    source: &S,
    cfg: &HeatmapConfig,
) -> Result<Heatmap, Error>
where
    S: ElevationSource + ?Sized,
{
    let grid = GridSpec::new(bounds, interval, cfg.max_grid_dimension)?;
    if !grid.has_pixels() {
        return Err(Error::EmptyRaster {
            width: grid.width(),
            height: grid.height(),
        });
    }
    debug!(
        "grid {}x{} pixels, {}x{} lattice, interval {}",
        grid.width(),
        grid.height(),
        grid.columns(),
        grid.rows(),
        interval
    );

    let samples = sample_grid(&grid, source);
    let Some((z_min, z_max)) = samples.elevation_range() else {
        warn!("no valid points among {} lattice points", samples.queried());
        return Err(Error::NoSamples);
    };

    let image = rasterize(samples.samples(), &grid, z_min, z_max, &cfg.raster)?;
    Ok(Heatmap {
        grid,
        samples,
        image,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use th_core::{Bounds2d, Error, Point2d, Point3d, Rgba8, heat_color};
    use th_surface::TinSurface;

    use super::{HeatmapConfig, build_heatmap};

    fn bounds(x0: f64, y0: f64, x1: f64, y1: f64) -> Bounds2d {
        Bounds2d::new(Point2d::new(x0, y0), Point2d::new(x1, y1))
    }

    #[test]
    fn plane_round_trip() {
        let hm = build_heatmap(
            bounds(0.0, 0.0, 2.0, 2.0),
            1.0,
            &|x: f64, y: f64| Some(x + y),
            &HeatmapConfig::default(),
        )
        .expect("heatmap");

        assert_eq!(hm.samples.len(), 9);
        assert_eq!((hm.z_min(), hm.z_max()), (0.0, 4.0));
        assert_eq!((hm.image.width(), hm.image.height()), (2, 2));
        assert_eq!(hm.image.get(0, 1), Some(&heat_color(0.0)));
    }

    #[test]
    fn oversized_grid_never_queries_source() {
        let calls = Cell::new(0usize);
        let source = |_: f64, _: f64| {
            calls.set(calls.get() + 1);
            Some(0.0)
        };
        let res = build_heatmap(
            bounds(0.0, 0.0, 10000.0, 10000.0),
            1.0,
            &source,
            &HeatmapConfig::default(),
        );

        assert!(matches!(res, Err(Error::GridTooLarge { max: 5000, .. })));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn invalid_interval_and_degenerate_extent_are_rejected() {
        let src = |_: f64, _: f64| Some(1.0);
        let cfg = HeatmapConfig::default();
        assert_eq!(
            build_heatmap(bounds(0.0, 0.0, 1.0, 1.0), 0.0, &src, &cfg).err(),
            Some(Error::InvalidInterval(0.0))
        );
        assert_eq!(
            build_heatmap(bounds(0.0, 0.0, 1.0, 0.0), 0.5, &src, &cfg).err(),
            Some(Error::EmptyRaster {
                width: 2,
                height: 0,
            })
        );
    }

    #[test]
    fn surface_outside_query_window_reports_no_samples() {
        let src = |x: f64, _: f64| if x > 100.0 { Some(1.0) } else { None };
        let res = build_heatmap(
            bounds(0.0, 0.0, 5.0, 5.0),
            1.0,
            &src,
            &HeatmapConfig::default(),
        );
        assert_eq!(res.err(), Some(Error::NoSamples));
    }

    #[test]
    fn tin_surface_end_to_end() {
        let surface = TinSurface::new(
            "ramp",
            vec![
                Point3d::new(0.0, 0.0, 10.0),
                Point3d::new(4.0, 0.0, 10.0),
                Point3d::new(4.0, 4.0, 14.0),
            ],
            vec![[0, 1, 2]],
        )
        .expect("valid surface");

        let hm = build_heatmap(surface.bounds(), 1.0, &surface, &HeatmapConfig::default())
            .expect("heatmap");

        // Lower-right triangle of a 5x5 lattice: 15 points with y <= x.
        assert_eq!(hm.samples.len(), 15);
        assert!(hm.samples.samples().iter().all(|s| s.y <= s.x));
        assert_eq!((hm.z_min(), hm.z_max()), (10.0, 14.0));
        // Top-left pixel lies outside the footprint and keeps the background.
        assert_eq!(hm.image.get(0, 0), Some(&Rgba8::BLACK));
    }
}

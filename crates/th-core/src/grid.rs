use crate::{Bounds2d, Error, Point2d};

/// Largest raster width or height accepted unless the caller overrides it.
pub const DEFAULT_MAX_GRID_DIMENSION: usize = 5000;

/// Minimum slack, in cells, for snapping a cell ratio to an integer.
///
/// The slack actually applied grows with coordinate magnitude over the interval,
/// so differences of survey-scale coordinates still land on the right cell.
pub const LATTICE_TOLERANCE: f64 = 1e-9;

/// Validated discretization of a planar extent at a fixed interval.
///
/// Raster size is `ceil(span / interval)` per axis. The sampling lattice is
/// the set of `min + i * interval` values not exceeding `max`, which holds
/// `floor(span / interval) + 1` points per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    bounds: Bounds2d,
    interval: f64,
    width: usize,
    height: usize,
    columns: usize,
    rows: usize,
}

impl GridSpec {
    /// Validates `bounds` and `interval` and computes dimensions.
    ///
    /// Dimensions are compared against `max_dimension` in floating point,
    /// before any integer conversion, so a huge extent is rejected cheaply.
    pub fn new(bounds: Bounds2d, interval: f64, max_dimension: usize) -> Result<Self, Error> {
        if !bounds.is_valid() {
            return Err(Error::InvalidBounds);
        }
        if !interval.is_finite() || interval <= 0.0 {
            return Err(Error::InvalidInterval(interval));
        }

        let tol_x = axis_tolerance(bounds.min.x.abs().max(bounds.max.x.abs()), interval);
        let tol_y = axis_tolerance(bounds.min.y.abs().max(bounds.max.y.abs()), interval);
        let ratio_x = bounds.span_x() / interval;
        let ratio_y = bounds.span_y() / interval;
        let width_f = snapped(ratio_x, tol_x).unwrap_or_else(|| ratio_x.ceil());
        let height_f = snapped(ratio_y, tol_y).unwrap_or_else(|| ratio_y.ceil());
        if !(width_f <= max_dimension as f64 && height_f <= max_dimension as f64) {
            return Err(Error::GridTooLarge {
                width: width_f,
                height: height_f,
                max: max_dimension,
            });
        }

        Ok(Self {
            bounds,
            interval,
            width: width_f as usize,
            height: height_f as usize,
            columns: snap_floor(ratio_x, tol_x) as usize + 1,
            rows: snap_floor(ratio_y, tol_y) as usize + 1,
        })
    }

    pub fn bounds(&self) -> Bounds2d {
        self.bounds
    }

    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of lattice x-values visited by the sampler.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of lattice y-values visited by the sampler.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn has_pixels(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Lattice point `(i, j)`, clamped so it never leaves the bounds.
    pub fn lattice_point(&self, i: usize, j: usize) -> Point2d {
        Point2d {
            x: (self.bounds.min.x + i as f64 * self.interval).min(self.bounds.max.x),
            y: (self.bounds.min.y + j as f64 * self.interval).min(self.bounds.max.y),
        }
    }

    /// Maps a domain point to `(px, py)` with row 0 at the top.
    ///
    /// Returns `None` when the point lands outside the raster.
    pub fn pixel_of(&self, p: Point2d) -> Option<(usize, usize)> {
        let b = &self.bounds;
        let tol_x = axis_tolerance(p.x.abs().max(b.min.x.abs()), self.interval);
        let tol_y = axis_tolerance(p.y.abs().max(b.min.y.abs()), self.interval);
        let fx = snap_floor((p.x - b.min.x) / self.interval, tol_x);
        let fy = snap_floor((p.y - b.min.y) / self.interval, tol_y);
        if !(fx >= 0.0 && fy >= 0.0) || fx >= self.width as f64 || fy >= self.height as f64 {
            return None;
        }

        let px = fx as usize;
        let py = self.height - 1 - fy as usize;
        Some((px, py))
    }
}

/// Snapping slack in cells for coordinates of size `magnitude`.
///
/// Differences of large coordinates carry an absolute error of a few ulps of
/// the coordinate, which becomes `magnitude * EPSILON / interval` cells.
fn axis_tolerance(magnitude: f64, interval: f64) -> f64 {
    LATTICE_TOLERANCE.max(8.0 * f64::EPSILON * magnitude / interval)
}

/// Nearest integer to `ratio` when it lies within `tol` of it.
fn snapped(ratio: f64, tol: f64) -> Option<f64> {
    let n = ratio.round();
    ((ratio - n).abs() <= tol).then_some(n)
}

fn snap_floor(ratio: f64, tol: f64) -> f64 {
    snapped(ratio, tol).unwrap_or_else(|| ratio.floor())
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_MAX_GRID_DIMENSION, GridSpec};
    use crate::{Bounds2d, Error, Point2d};

    fn bounds(x0: f64, y0: f64, x1: f64, y1: f64) -> Bounds2d {
        Bounds2d::new(Point2d::new(x0, y0), Point2d::new(x1, y1))
    }

    #[test]
    fn dimensions_use_ceil_and_lattice_uses_floor() {
        let g = GridSpec::new(bounds(0.0, 0.0, 2.0, 2.0), 1.0, DEFAULT_MAX_GRID_DIMENSION)
            .expect("valid grid");
        assert_eq!((g.width(), g.height()), (2, 2));
        assert_eq!((g.columns(), g.rows()), (3, 3));

        let g = GridSpec::new(bounds(0.0, 0.0, 2.5, 1.0), 1.0, DEFAULT_MAX_GRID_DIMENSION)
            .expect("valid grid");
        assert_eq!((g.width(), g.height()), (3, 1));
        assert_eq!((g.columns(), g.rows()), (3, 2));
    }

    #[test]
    fn inexact_interval_keeps_end_point() {
        // 0.3 / 0.1 evaluates to 2.9999999999999996 in binary floating point.
        let g = GridSpec::new(bounds(0.0, 0.0, 0.3, 0.3), 0.1, DEFAULT_MAX_GRID_DIMENSION)
            .expect("valid grid");
        assert_eq!(g.columns(), 4);
        let last = g.lattice_point(3, 3);
        assert!((last.x - 0.3).abs() < 1e-12);
        assert!(last.x <= 0.3 && last.y <= 0.3);
    }

    #[test]
    fn zero_span_axis_has_one_lattice_point_and_no_pixels() {
        let g = GridSpec::new(bounds(1.0, 1.0, 1.0, 5.0), 1.0, DEFAULT_MAX_GRID_DIMENSION)
            .expect("valid grid");
        assert_eq!(g.width(), 0);
        assert_eq!(g.height(), 4);
        assert_eq!(g.columns(), 1);
        assert!(!g.has_pixels());
    }

    #[test]
    fn rejects_bad_interval_bounds_and_oversize() {
        let b = bounds(0.0, 0.0, 10.0, 10.0);
        assert_eq!(GridSpec::new(b, 0.0, 5000), Err(Error::InvalidInterval(0.0)));
        assert_eq!(GridSpec::new(b, -1.0, 5000), Err(Error::InvalidInterval(-1.0)));
        assert!(matches!(
            GridSpec::new(b, f64::NAN, 5000),
            Err(Error::InvalidInterval(_))
        ));
        assert_eq!(
            GridSpec::new(bounds(1.0, 0.0, 0.0, 1.0), 1.0, 5000),
            Err(Error::InvalidBounds)
        );

        let huge = bounds(0.0, 0.0, 10000.0, 10000.0);
        assert_eq!(
            GridSpec::new(huge, 1.0, DEFAULT_MAX_GRID_DIMENSION),
            Err(Error::GridTooLarge {
                width: 10000.0,
                height: 10000.0,
                max: 5000,
            })
        );
        assert!(GridSpec::new(bounds(0.0, 0.0, 5000.0, 1.0), 1.0, 5000).is_ok());
        assert!(GridSpec::new(bounds(0.0, 0.0, 1.0, 5001.0), 1.0, 5000).is_err());
    }

    #[test]
    fn survey_scale_lattice_maps_one_to_one_onto_pixels() {
        for &(x0, y0, interval, expected) in &[
            (4_500_000.0, 4_500_000.0, 0.1, 200usize),
            (512_345.67, 5_123_456.78, 0.1, 200),
            (512_345.67, 5_123_456.78, 0.3, 67),
        ] {
            let g = GridSpec::new(
                bounds(x0, y0, x0 + 20.0, y0 + 20.0),
                interval,
                DEFAULT_MAX_GRID_DIMENSION,
            )
            .expect("valid grid");
            assert_eq!((g.width(), g.height()), (expected, expected));

            let mut hits = vec![0u32; g.width() * g.height()];
            for i in 0..g.columns() {
                for j in 0..g.rows() {
                    if let Some((px, py)) = g.pixel_of(g.lattice_point(i, j)) {
                        hits[py * g.width() + px] += 1;
                    }
                }
            }
            assert!(
                hits.iter().all(|&h| h == 1),
                "interval {interval} at ({x0}, {y0}): {} pixels not hit exactly once",
                hits.iter().filter(|&&h| h != 1).count()
            );
        }
    }

    #[test]
    fn pixel_mapping_flips_y_and_discards_outside() {
        let g = GridSpec::new(bounds(0.0, 0.0, 2.0, 2.0), 1.0, DEFAULT_MAX_GRID_DIMENSION)
            .expect("valid grid");

        assert_eq!(g.pixel_of(Point2d::new(0.0, 0.0)), Some((0, 1)));
        assert_eq!(g.pixel_of(Point2d::new(1.0, 1.0)), Some((1, 0)));
        assert_eq!(g.pixel_of(Point2d::new(0.0, 1.0)), Some((0, 0)));
        assert_eq!(g.pixel_of(Point2d::new(2.0, 2.0)), None);
        assert_eq!(g.pixel_of(Point2d::new(1.0, 2.0)), None);
        assert_eq!(g.pixel_of(Point2d::new(-0.5, 0.0)), None);
    }
}

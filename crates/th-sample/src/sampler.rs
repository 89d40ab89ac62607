use log::debug;
use th_core::{GridSpec, Point2d};

use crate::ElevationSource;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    pub fn xy(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }
}

/// Samples in scan order plus the running elevation range.
///
/// While empty, `z_min` is `+inf` and `z_max` is `-inf`, so `z_min > z_max`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
    z_min: f64,
    z_max: f64,
    queried: usize,
}

impl Default for SampleSet {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
            z_min: f64::INFINITY,
            z_max: f64::NEG_INFINITY,
            queried: 0,
        }
    }
}

impl SampleSet {
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn z_min(&self) -> f64 {
        self.z_min
    }

    pub fn z_max(&self) -> f64 {
        self.z_max
    }

    /// `(z_min, z_max)`, or `None` when nothing was sampled.
    pub fn elevation_range(&self) -> Option<(f64, f64)> {
        if self.samples.is_empty() {
            None
        } else {
            Some((self.z_min, self.z_max))
        }
    }

    /// Number of lattice points the source was asked about.
    pub fn queried(&self) -> usize {
        self.queried
    }

    fn push(&mut self, sample: Sample) {
        self.z_min = self.z_min.min(sample.z);
        self.z_max = self.z_max.max(sample.z);
        self.samples.push(sample);
    }
}

/// Queries `source` at every lattice point of `grid`.
///
/// Order is x ascending in the outer loop, y ascending in the inner loop.
/// Coordinates come from integer indices, so no error accumulates along a
/// row. Points answering `None` or a non-finite value are skipped.
pub fn sample_grid<S>(grid: &GridSpec, source: &S) -> SampleSet
where
    S: ElevationSource + ?Sized,
{
    let mut set = SampleSet::default();

    for i in 0..grid.columns() {
        for j in 0..grid.rows() {
            let p = grid.lattice_point(i, j);
            set.queried += 1;

            let Some(z) = source.elevation_at(p.x, p.y) else {
                continue;
            };
            if !z.is_finite() {
                continue;
            }

            set.push(Sample { x: p.x, y: p.y, z });
        }
    }

    debug!(
        "sampled {} of {} lattice points ({}x{})",
        set.len(),
        set.queried,
        grid.columns(),
        grid.rows()
    );
    set
}

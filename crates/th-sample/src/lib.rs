//! Regular-grid elevation sampling.
//!
//! The sampler walks the lattice of a [`th_core::GridSpec`] with x as the outer
//! loop and y as the inner loop, both ascending, and asks an
//! [`ElevationSource`] for the elevation at each point.
//!
//! Missing data policy:
//! - A source answers `None` for points it cannot evaluate (outside the
//!   irregular footprint, internal failure, ...).
//! - Non-finite answers are treated the same as `None`.
//! - Such points are skipped silently; they are neither counted as errors
//!   nor recorded as placeholder samples.
//!
//! An empty [`SampleSet`] is a valid result. Callers detect it with
//! [`SampleSet::is_empty`] or [`SampleSet::elevation_range`].

mod sampler;
mod source;

pub use sampler::{Sample, SampleSet, sample_grid};
pub use source::ElevationSource;

//! Triangulated irregular network (TIN) surfaces.
//!
//! A [`TinSurface`] is a set of 3D vertices joined into triangles. Its
//! elevation at a planar point is the linear (barycentric) interpolation of
//! the triangle containing that point. Points inside the bounding rectangle
//! but outside every triangle have no elevation.
//!
//! Surfaces are exchanged as JSON documents holding one or more named
//! surfaces, see [`SurfaceDocument`].

mod document;
mod tin;

pub use document::{SurfaceDocument, SurfaceRecord};
pub use tin::TinSurface;

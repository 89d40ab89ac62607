use log::warn;
use serde::Deserialize;
use th_core::{Error, Point3d};

use crate::TinSurface;

/// One named surface as stored on disk.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SurfaceRecord {
    pub name: String,
    pub vertices: Vec<[f64; 3]>,
    pub triangles: Vec<[usize; 3]>,
}

impl SurfaceRecord {
    pub fn build(&self) -> Result<TinSurface, Error> {
        let vertices = self
            .vertices
            .iter()
            .map(|&[x, y, z]| Point3d::new(x, y, z))
            .collect();
        TinSurface::new(self.name.clone(), vertices, self.triangles.clone())
    }
}

/// A collection of surfaces, e.g.
///
/// ```json
/// { "surfaces": [ { "name": "ground", "vertices": [[0,0,1], [1,0,2], [0,1,3]],
///                   "triangles": [[0,1,2]] } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SurfaceDocument {
    #[serde(default)]
    pub surfaces: Vec<SurfaceRecord>,
}

impl SurfaceDocument {
    pub fn from_json_slice(data: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(data)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.surfaces.iter().map(|s| s.name.as_str())
    }

    /// Builds every record, logging and skipping the ones that are invalid.
    pub fn valid_surfaces(&self) -> Vec<TinSurface> {
        self.surfaces
            .iter()
            .filter_map(|record| match record.build() {
                Ok(surface) => Some(surface),
                Err(e) => {
                    warn!("skipping surface '{}': {e}", record.name);
                    None
                }
            })
            .collect()
    }
}

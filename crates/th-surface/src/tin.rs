use th_core::{Bounds2d, Error, Point2d, Point3d};
use th_sample::ElevationSource;

/// Barycentric slack so points on shared edges resolve to a triangle.
const EDGE_TOLERANCE: f64 = 1e-9;
/// Triangles with `|2 * area|` at or below this are never hit.
const DEGENERATE_AREA: f64 = 1e-12;

#[derive(Debug, Clone)]
struct Triangle {
    v: [usize; 3],
    bounds: Bounds2d,
    det: f64,
}

/// Uniform bucket index from planar cells to overlapping triangles.
#[derive(Debug, Clone)]
struct BucketIndex {
    bounds: Bounds2d,
    nx: usize,
    ny: usize,
    cell_w: f64,
    cell_h: f64,
    buckets: Vec<Vec<usize>>,
}

impl BucketIndex {
    fn build(bounds: Bounds2d, triangles: &[Triangle]) -> Self {
        let side = ((triangles.len() as f64).sqrt().ceil() as usize).clamp(1, 1024);
        let nx = if bounds.span_x() > 0.0 { side } else { 1 };
        let ny = if bounds.span_y() > 0.0 { side } else { 1 };
        let cell_w = bounds.span_x() / nx as f64;
        let cell_h = bounds.span_y() / ny as f64;

        let mut index = Self {
            bounds,
            nx,
            ny,
            cell_w,
            cell_h,
            buckets: vec![Vec::new(); nx * ny],
        };

        for (ti, tri) in triangles.iter().enumerate() {
            if tri.det.abs() <= DEGENERATE_AREA {
                continue;
            }
            let (x0, y0) = index.cell_of(tri.bounds.min);
            let (x1, y1) = index.cell_of(tri.bounds.max);
            for cy in y0..=y1 {
                for cx in x0..=x1 {
                    index.buckets[cy * nx + cx].push(ti);
                }
            }
        }
        index
    }

    fn cell_of(&self, p: Point2d) -> (usize, usize) {
        (
            axis_cell(p.x - self.bounds.min.x, self.cell_w, self.nx),
            axis_cell(p.y - self.bounds.min.y, self.cell_h, self.ny),
        )
    }

    fn candidates(&self, p: Point2d) -> &[usize] {
        let (cx, cy) = self.cell_of(p);
        &self.buckets[cy * self.nx + cx]
    }
}

fn axis_cell(offset: f64, cell: f64, n: usize) -> usize {
    if cell <= 0.0 || offset <= 0.0 {
        return 0;
    }
    ((offset / cell).floor() as usize).min(n - 1)
}

#[derive(Debug, Clone)]
pub struct TinSurface {
    name: String,
    vertices: Vec<Point3d>,
    triangles: Vec<Triangle>,
    bounds: Bounds2d,
    index: BucketIndex,
}

impl TinSurface {
    /// Builds a surface, rejecting empty meshes, non-finite vertices and
    /// triangle indices that do not reference a vertex.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Point3d>,
        triangles: Vec<[usize; 3]>,
    ) -> Result<Self, Error> {
        let name = name.into();
        if triangles.is_empty() {
            return Err(Error::InvalidSurface(format!("'{name}' has no triangles")));
        }
        if let Some(i) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidSurface(format!(
                "'{name}' vertex {i} is not finite"
            )));
        }
        let bounds = Bounds2d::from_points(vertices.iter().map(|v| v.xy()))
            .ok_or_else(|| Error::InvalidSurface(format!("'{name}' has no vertices")))?;

        let mut tris = Vec::with_capacity(triangles.len());
        for (ti, v) in triangles.into_iter().enumerate() {
            if let Some(&bad) = v.iter().find(|&&i| i >= vertices.len()) {
                return Err(Error::InvalidSurface(format!(
                    "'{name}' triangle {ti} references vertex {bad} of {}",
                    vertices.len()
                )));
            }
            let [a, b, c] = v.map(|i| vertices[i].xy());
            let tri_bounds = Bounds2d::from_points([a, b, c])
                .ok_or_else(|| Error::InvalidSurface(format!("'{name}' triangle {ti}")))?;
            tris.push(Triangle {
                v,
                bounds: tri_bounds,
                det: (b - a).cross(c - a),
            });
        }

        let index = BucketIndex::build(bounds, &tris);
        Ok(Self {
            name,
            vertices,
            triangles: tris,
            bounds,
            index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Planar bounding box of all vertices.
    pub fn bounds(&self) -> Bounds2d {
        self.bounds
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Elevation at `p`, interpolated within the first triangle containing it.
    pub fn elevation(&self, p: Point2d) -> Option<f64> {
        if !p.is_finite() || !self.bounds.contains(p) {
            return None;
        }

        self.index
            .candidates(p)
            .iter()
            .find_map(|&ti| self.interpolate(&self.triangles[ti], p))
    }

    fn interpolate(&self, tri: &Triangle, p: Point2d) -> Option<f64> {
        let [a, b, c] = tri.v.map(|i| self.vertices[i]);
        let (a2, b2, c2) = (a.xy(), b.xy(), c.xy());

        let wb = (p - a2).cross(c2 - a2) / tri.det;
        let wc = (b2 - a2).cross(p - a2) / tri.det;
        let wa = 1.0 - wb - wc;
        if wa < -EDGE_TOLERANCE || wb < -EDGE_TOLERANCE || wc < -EDGE_TOLERANCE {
            return None;
        }
        Some(wa * a.z + wb * b.z + wc * c.z)
    }
}

impl ElevationSource for TinSurface {
    fn elevation_at(&self, x: f64, y: f64) -> Option<f64> {
        self.elevation(Point2d::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use th_core::{Error, Point2d, Point3d};
    use th_sample::ElevationSource;

    use super::TinSurface;

    /// Unit square split along its diagonal, z = x + 2y.
    fn square() -> TinSurface {
        TinSurface::new(
            "square",
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(1.0, 0.0, 1.0),
                Point3d::new(1.0, 1.0, 3.0),
                Point3d::new(0.0, 1.0, 2.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .expect("valid surface")
    }

    #[test]
    fn interpolates_planar_surface_exactly() {
        let s = square();
        for &(x, y) in &[(0.0, 0.0), (0.25, 0.5), (0.9, 0.1), (1.0, 1.0), (0.5, 0.5)] {
            let z = s.elevation_at(x, y).expect("inside");
            assert!((z - (x + 2.0 * y)).abs() < 1e-9, "z({x}, {y}) = {z}");
        }
        assert_eq!(s.bounds().max, Point2d::new(1.0, 1.0));
        assert_eq!((s.num_vertices(), s.num_triangles()), (4, 2));
    }

    #[test]
    fn points_outside_footprint_have_no_elevation() {
        // Right triangle: the upper-left half of its bounding box is empty.
        let s = TinSurface::new(
            "wedge",
            vec![
                Point3d::new(0.0, 0.0, 5.0),
                Point3d::new(2.0, 0.0, 5.0),
                Point3d::new(2.0, 2.0, 5.0),
            ],
            vec![[0, 1, 2]],
        )
        .expect("valid surface");

        assert_eq!(s.elevation_at(1.5, 0.5), Some(5.0));
        assert_eq!(s.elevation_at(0.5, 1.5), None);
        assert_eq!(s.elevation_at(3.0, 0.0), None);
        assert_eq!(s.elevation_at(f64::NAN, 0.0), None);
    }

    #[test]
    fn degenerate_triangles_are_ignored() {
        let s = TinSurface::new(
            "sliver",
            vec![
                Point3d::new(0.0, 0.0, 1.0),
                Point3d::new(1.0, 1.0, 1.0),
                Point3d::new(2.0, 2.0, 1.0),
            ],
            vec![[0, 1, 2]],
        )
        .expect("indices are valid");
        assert_eq!(s.elevation_at(1.0, 1.0), None);
    }

    #[test]
    fn many_triangles_resolve_through_index() {
        let n = 20usize;
        let mut vertices = Vec::new();
        for j in 0..=n {
            for i in 0..=n {
                let (x, y) = (i as f64, j as f64);
                vertices.push(Point3d::new(x, y, 3.0 * x - y));
            }
        }
        let mut triangles = Vec::new();
        for j in 0..n {
            for i in 0..n {
                let v00 = j * (n + 1) + i;
                let v10 = v00 + 1;
                let v01 = v00 + n + 1;
                let v11 = v01 + 1;
                triangles.push([v00, v10, v11]);
                triangles.push([v00, v11, v01]);
            }
        }
        let s = TinSurface::new("grid", vertices, triangles).expect("valid surface");

        for &(x, y) in &[(0.0, 0.0), (7.3, 12.9), (19.99, 0.01), (20.0, 20.0), (10.0, 5.0)] {
            let z = s.elevation_at(x, y).expect("inside");
            assert!((z - (3.0 * x - y)).abs() < 1e-9);
        }
    }

    #[test]
    fn rejects_invalid_meshes() {
        let v = vec![Point3d::new(0.0, 0.0, 0.0)];
        assert!(matches!(
            TinSurface::new("a", v.clone(), vec![]),
            Err(Error::InvalidSurface(_))
        ));
        assert!(matches!(
            TinSurface::new("b", v, vec![[0, 0, 1]]),
            Err(Error::InvalidSurface(_))
        ));
        assert!(matches!(
            TinSurface::new("c", vec![Point3d::new(f64::NAN, 0.0, 0.0)], vec![[0, 0, 0]]),
            Err(Error::InvalidSurface(_))
        ));
        assert!(matches!(
            TinSurface::new("d", vec![], vec![[0, 0, 0]]),
            Err(Error::InvalidSurface(_))
        ));
    }
}

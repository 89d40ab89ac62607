/// Total elevation query over the plane.
///
/// Implementations must not panic for any finite input; points without a
/// value answer `None`.
pub trait ElevationSource {
    fn elevation_at(&self, x: f64, y: f64) -> Option<f64>;
}

impl<F> ElevationSource for F
where
    F: Fn(f64, f64) -> Option<f64>,
{
    fn elevation_at(&self, x: f64, y: f64) -> Option<f64> {
        self(x, y)
    }
}

/// 8-bit RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Clamps `t` into `[0, 1]`. NaN maps to `0`.
pub fn clamp01(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

/// Linear blue (`t = 0`) to red (`t = 1`) ramp, fully opaque.
///
/// `t` is re-clamped, so out-of-range inputs saturate at the ends of the ramp.
pub fn heat_color(t: f64) -> Rgba8 {
    let t = clamp01(t);
    Rgba8::opaque(to_channel(t), 0, to_channel(1.0 - t))
}

fn to_channel(v: f64) -> u8 {
    (255.0 * v).round().clamp(0.0, 255.0) as u8
}

use core::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    InvalidBounds,
    InvalidInterval(f64),
    GridTooLarge {
        width: f64,
        height: f64,
        max: usize,
    },
    EmptyRaster {
        width: usize,
        height: usize,
    },
    NoSamples,
    InvalidSurface(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::InvalidBounds => write!(f, "bounds must be finite with min <= max"),
            Self::InvalidInterval(v) => {
                write!(f, "grid interval must be a finite value > 0, got {v}")
            }
            Self::GridTooLarge { width, height, max } => write!(
                f,
                "grid too large: {width}x{height} exceeds the maximum dimension {max}"
            ),
            Self::EmptyRaster { width, height } => {
                write!(f, "raster has no pixels: {width}x{height}")
            }
            Self::NoSamples => write!(f, "no valid points sampled"),
            Self::InvalidSurface(msg) => write!(f, "invalid surface: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_mentions_limits() {
        let e = Error::GridTooLarge {
            width: 10000.0,
            height: 12.0,
            max: 5000,
        };
        assert_eq!(
            e.to_string(),
            "grid too large: 10000x12 exceeds the maximum dimension 5000"
        );
        assert_eq!(Error::NoSamples.to_string(), "no valid points sampled");
    }
}

use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer length does not match `width * height * channels`.
    SizeMismatch { expected: usize, actual: usize },
    InvalidStride,
    /// Interleaved pixel data with a channel count other than 3 (RGB) or 4 (RGBA).
    UnsupportedChannels(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "pixel buffer size mismatch: expected {expected}, got {actual}")
            }
            Self::InvalidStride => write!(f, "row stride is smaller than image width"),
            Self::UnsupportedChannels(n) => {
                write!(f, "unsupported channel count {n}, expected 3 or 4")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_messages() {
        let e = Error::SizeMismatch {
            expected: 12,
            actual: 9,
        };
        assert_eq!(e.to_string(), "pixel buffer size mismatch: expected 12, got 9");
        assert_eq!(
            Error::UnsupportedChannels(2).to_string(),
            "unsupported channel count 2, expected 3 or 4"
        );
    }
}

//! Error type shared by every raster operation.

use thiserror::Error;

/// Failure reported by a raster operation.
///
/// Operations never panic on pixel values; they fail only on structural
/// problems (mismatched sizes, malformed buffers, bad parameters) or when the
/// requested operation is not supported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    /// A binary operator was given two images of different size.
    ///
    /// Both images are left untouched.
    #[error(
        "images are not the same size: {expected_width}x{expected_height} vs {actual_width}x{actual_height}"
    )]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    /// A raw buffer does not hold exactly `width * height * 4` bytes.
    #[error("buffer holds {actual} bytes, {width}x{height} RGBA needs {expected}")]
    BufferLength {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// A single-channel plane does not hold exactly `width * height` samples.
    #[error("plane holds {actual} samples, {width}x{height} needs {expected}")]
    PlaneLength {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Kernel weights do not fill a `width x height` grid.
    #[error("{len} kernel weights do not fill {width}x{height}")]
    KernelShape { width: usize, height: usize, len: usize },

    /// Gaussian kernel sizes must be odd and non-zero.
    #[error("kernel size must be odd and non-zero, got {0}")]
    InvalidKernelSize(usize),

    /// Painterly radii must be non-empty and strictly positive.
    #[error("stroke radii must be non-empty and greater than zero")]
    InvalidRadius,

    /// The operation is not supported; the image was cleared to black.
    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

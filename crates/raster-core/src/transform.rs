//! Geometric transforms.
//!
//! None of these are supported. Each one clears the image to transparent
//! black and reports [`ImageError::Unsupported`], so callers see a
//! deterministic sentinel instead of a half-written buffer.

use crate::error::ImageError;
use crate::image::RasterImage;

impl RasterImage {
    fn unsupported(&mut self, operation: &'static str) -> Result<(), ImageError> {
        self.clear_to_black();
        tracing::warn!(operation, "Operation not supported, image cleared");
        Err(ImageError::Unsupported(operation))
    }

    /// Halve the image size. Not supported.
    pub fn half_size(&mut self) -> Result<(), ImageError> {
        self.unsupported("half size")
    }

    /// Double the image size. Not supported.
    pub fn double_size(&mut self) -> Result<(), ImageError> {
        self.unsupported("double size")
    }

    /// Scale by an arbitrary factor. Not supported.
    pub fn resize(&mut self, scale: f32) -> Result<(), ImageError> {
        tracing::debug!(scale, "Resize requested");
        self.unsupported("resize")
    }

    /// Rotate by `angle` degrees. Not supported.
    pub fn rotate(&mut self, angle: f32) -> Result<(), ImageError> {
        tracing::debug!(angle, "Rotate requested");
        self.unsupported("rotate")
    }
}

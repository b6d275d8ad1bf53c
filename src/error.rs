use std::path::PathBuf;

use raster_core::ImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Truncated TGA header: {0} bytes")]
    TruncatedHeader(usize),

    #[error("Truncated pixel data: needed {expected} bytes, found {actual}")]
    TruncatedData { expected: usize, actual: usize },

    #[error("Unsupported TGA image type: {0}")]
    UnsupportedImageType(u8),

    #[error("Color-mapped TGA images are not supported")]
    ColorMapped,

    #[error("Unsupported pixel depth: {0} bits")]
    UnsupportedDepth(u8),

    #[error("Image has zero width or height")]
    ZeroDimensions,

    #[error("Image too large for format: {width}x{height}")]
    TooLarge { width: usize, height: usize },

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unknown image format for {}", .0.display())]
    UnknownFormat(PathBuf),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_unsupported_type() {
        let error = CodecError::UnsupportedImageType(1);
        assert_eq!(error.to_string(), "Unsupported TGA image type: 1");
    }

    #[test]
    fn test_codec_error_truncated_data() {
        let error = CodecError::TruncatedData {
            expected: 12,
            actual: 7,
        };
        assert_eq!(
            error.to_string(),
            "Truncated pixel data: needed 12 bytes, found 7"
        );
    }

    #[test]
    fn test_codec_error_unknown_format() {
        let error = CodecError::UnknownFormat(PathBuf::from("photo.bmp"));
        assert_eq!(error.to_string(), "Unknown image format for photo.bmp");
    }

    #[test]
    fn test_app_error_io_names_path() {
        let error = AppError::Io {
            path: PathBuf::from("missing.tga"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(error.to_string(), "IO error on missing.tga: not found");
    }

    #[test]
    fn test_app_error_from_image_error() {
        let app_error: AppError = ImageError::InvalidRadius.into();
        match app_error {
            AppError::Image(ImageError::InvalidRadius) => {}
            _ => panic!("Expected Image variant"),
        }
    }

    #[test]
    fn test_app_error_from_codec_error() {
        let app_error: AppError = CodecError::ZeroDimensions.into();
        assert_eq!(
            app_error.to_string(),
            "Codec error: Image has zero width or height"
        );
    }
}

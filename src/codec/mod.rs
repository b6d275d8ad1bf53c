//! File codecs around the in-memory [`RasterImage`].
//!
//! Decoders produce a [`RawImage`]: straight (non-premultiplied) RGBA rows in
//! whatever order the file stores them. Converting to a [`RasterImage`]
//! premultiplies and normalizes to top-to-bottom; the way back
//! un-premultiplies and lays rows out the way the target format wants.

pub mod png;
pub mod tga;

use std::path::Path;

use raster_core::color::{premultiply, to_rgb};
use raster_core::image::CHANNELS;
use raster_core::RasterImage;

use crate::error::{AppError, CodecError};

/// Vertical order of rows in a raw buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOrder {
    TopDown,
    BottomUp,
}

/// Decoded pixels before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    pub width: usize,
    pub height: usize,
    pub order: RowOrder,
    /// Straight RGBA8, `width * height * 4` bytes.
    pub data: Vec<u8>,
}

impl RawImage {
    /// Premultiply and put row 0 at the top.
    pub fn into_raster(self) -> Result<RasterImage, CodecError> {
        let order = self.order;
        let mut data = self.data;
        for px in data.chunks_exact_mut(CHANNELS) {
            let premultiplied = premultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&premultiplied);
        }

        let image = RasterImage::from_rgba(self.width, self.height, data)?;
        Ok(match order {
            RowOrder::TopDown => image,
            RowOrder::BottomUp => image.reverse_rows(),
        })
    }

    /// Un-premultiply against black and lay rows out in `order`.
    pub fn from_raster(image: &RasterImage, order: RowOrder) -> Self {
        let oriented = match order {
            RowOrder::TopDown => image.clone(),
            RowOrder::BottomUp => image.reverse_rows(),
        };

        let mut data = Vec::with_capacity(oriented.as_bytes().len());
        for px in oriented.pixels() {
            data.extend_from_slice(&to_rgb(px));
            data.push(px[3]);
        }

        Self {
            width: image.width(),
            height: image.height(),
            order,
            data,
        }
    }
}

/// Supported container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Tga,
    Png,
}

impl ImageFormat {
    /// Pick a format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, CodecError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("tga") => Ok(ImageFormat::Tga),
            Some("png") => Ok(ImageFormat::Png),
            _ => Err(CodecError::UnknownFormat(path.to_path_buf())),
        }
    }
}

/// Decode an in-memory file.
pub fn decode(bytes: &[u8], format: ImageFormat) -> Result<RasterImage, CodecError> {
    let raw = match format {
        ImageFormat::Tga => tga::decode(bytes)?,
        ImageFormat::Png => png::decode(bytes)?,
    };
    raw.into_raster()
}

/// Encode to an in-memory file.
pub fn encode(image: &RasterImage, format: ImageFormat) -> Result<Vec<u8>, CodecError> {
    match format {
        ImageFormat::Tga => tga::encode(&RawImage::from_raster(image, RowOrder::BottomUp)),
        ImageFormat::Png => png::encode(&RawImage::from_raster(image, RowOrder::TopDown)),
    }
}

/// Read and decode an image file.
pub fn load(path: &Path) -> Result<RasterImage, AppError> {
    let format = ImageFormat::from_path(path)?;
    let bytes = std::fs::read(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = decode(&bytes, format)?;

    tracing::info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Loaded image"
    );
    Ok(image)
}

/// Encode and write an image file. Nothing is written if encoding fails.
pub fn save(path: &Path, image: &RasterImage) -> Result<(), AppError> {
    let format = ImageFormat::from_path(path)?;
    let bytes = encode(image, format)?;
    std::fs::write(path, &bytes).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Saved image");
    Ok(())
}

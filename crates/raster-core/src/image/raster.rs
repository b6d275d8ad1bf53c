//! [`RasterImage`]: a row-major, top-to-bottom RGBA8 buffer.

use crate::color;
use crate::error::ImageError;

/// Number of interleaved channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// A width x height grid of premultiplied RGBA8 pixels.
///
/// Row 0 is the top of the image. The buffer always holds exactly
/// `width * height * 4` bytes; cloning deep-copies it.
///
/// # Example
///
/// ```
/// use raster_core::RasterImage;
///
/// let mut image = RasterImage::new(2, 1);
/// image.set_pixel(1, 0, [255, 0, 0, 255]);
///
/// assert_eq!(image.pixel(0, 0), [0, 0, 0, 0]);
/// assert_eq!(image.pixel(1, 0), [255, 0, 0, 255]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RasterImage {
    /// Allocate a zeroed (transparent black) image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * CHANNELS],
        }
    }

    /// Wrap an existing RGBA buffer, checking its length.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::BufferLength {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True for the 0x0 image produced by `Default`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The raw interleaved RGBA bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Iterate over pixels as RGBA chunks in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y * self.width + x) * CHANNELS
    }

    /// Read one pixel.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Overwrite one pixel.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the image.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }

    /// Whether `other` has the same width and height.
    #[inline]
    pub fn same_size(&self, other: &RasterImage) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub(crate) fn check_same_size(&self, other: &RasterImage) -> Result<(), ImageError> {
        if self.same_size(other) {
            Ok(())
        } else {
            Err(ImageError::DimensionMismatch {
                expected_width: self.width,
                expected_height: self.height,
                actual_width: other.width,
                actual_height: other.height,
            })
        }
    }

    /// Set every byte, alpha included, to zero.
    pub fn clear_to_black(&mut self) {
        self.data.fill(0);
    }

    /// Copy of this image with row order reversed.
    ///
    /// Converts between top-to-bottom memory order and the bottom-to-top
    /// order used on disk.
    pub fn reverse_rows(&self) -> RasterImage {
        let stride = self.width * CHANNELS;
        let mut data = Vec::with_capacity(self.data.len());
        if stride > 0 {
            for row in self.data.chunks_exact(stride).rev() {
                data.extend_from_slice(row);
            }
        }
        RasterImage {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Opaque 24-bit RGB view, alpha composited against black.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.len() * 3);
        for px in self.pixels() {
            rgb.extend_from_slice(&color::to_rgb(px));
        }
        rgb
    }

    /// Extract one color channel as a plane of `width * height` samples.
    pub(crate) fn channel_plane(&self, channel: usize) -> Vec<u8> {
        self.data
            .chunks_exact(CHANNELS)
            .map(|px| px[channel])
            .collect()
    }

    /// Write a plane back into one color channel.
    pub(crate) fn set_channel_plane(&mut self, channel: usize, plane: &[u8]) {
        debug_assert_eq!(plane.len(), self.len());
        for (px, &v) in self.data.chunks_exact_mut(CHANNELS).zip(plane) {
            px[channel] = v;
        }
    }
}

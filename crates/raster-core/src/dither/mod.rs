//! Dithering to black and white (or to a reduced color set).
//!
//! # Algorithms
//!
//! - **Threshold**: luminance below 0.5 is black, otherwise white
//! - **Random**: uniform noise is added to luminance before thresholding
//! - **Brightness-preserving**: the threshold is chosen so the share of
//!   white pixels matches the average brightness
//! - **Clustered dot**: a 4x4 ordered matrix tiled over the image
//! - **Floyd-Steinberg**: error diffusion of luminance to black and white
//! - **Color**: Floyd-Steinberg per channel onto the uniform-quantization
//!   levels (8 red, 8 green, 4 blue)
//!
//! All of them rewrite R, G and B and leave alpha untouched.

mod bright;
mod cluster;
mod floyd_steinberg;
mod options;
mod random;
mod threshold;

pub use cluster::CLUSTER_MATRIX;
pub use floyd_steinberg::{BLUE_LEVELS, RED_GREEN_LEVELS};
pub use options::{DitherOptions, DEFAULT_NOISE_AMPLITUDE};

use rand::Rng;

use crate::image::RasterImage;

/// Dither algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DitherMethod {
    Threshold,
    Random,
    Bright,
    Cluster,
    FloydSteinberg,
    Color,
}

impl RasterImage {
    /// Run the selected dither. `rng` is only drawn from by
    /// [`DitherMethod::Random`].
    pub fn dither<R: Rng + ?Sized>(
        &mut self,
        method: DitherMethod,
        options: &DitherOptions,
        rng: &mut R,
    ) {
        match method {
            DitherMethod::Threshold => self.dither_threshold(),
            DitherMethod::Random => self.dither_random(options, rng),
            DitherMethod::Bright => self.dither_bright(),
            DitherMethod::Cluster => self.dither_cluster(),
            DitherMethod::FloydSteinberg => self.dither_fs(options),
            DitherMethod::Color => self.dither_color(options),
        }
        tracing::debug!(method = ?method, width = self.width(), height = self.height(), "Dithered image");
    }
}

/// Set R, G and B of an RGBA pixel to black or white.
#[inline]
fn set_bilevel(px: &mut [u8], white: bool) {
    px[..3].fill(if white { 255 } else { 0 });
}

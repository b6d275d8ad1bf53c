use crate::color::normalized_luminance;
use crate::image::RasterImage;

use super::set_bilevel;

/// Luminance threshold on the normalized 0..=1 scale.
pub(super) const THRESHOLD: f32 = 0.5;

impl RasterImage {
    /// Threshold dithering at half brightness.
    pub fn dither_threshold(&mut self) {
        for px in self.as_bytes_mut().chunks_exact_mut(4) {
            let lum = normalized_luminance(px[0], px[1], px[2]);
            set_bilevel(px, lum >= THRESHOLD);
        }
    }
}

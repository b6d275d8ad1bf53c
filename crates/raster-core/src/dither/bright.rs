use crate::color::normalized_luminance;
use crate::image::RasterImage;

use super::set_bilevel;

impl RasterImage {
    /// Brightness-preserving threshold dithering.
    ///
    /// Sorts all luminances and thresholds at rank
    /// `round((1 - average) * pixel_count)`, so roughly `average` of the
    /// pixels end up white. Rank `pixel_count` (an all-black image) means no
    /// pixel is white.
    pub fn dither_bright(&mut self) {
        let count = self.len();
        if count == 0 {
            return;
        }

        let lums: Vec<f32> = self
            .pixels()
            .map(|px| normalized_luminance(px[0], px[1], px[2]))
            .collect();
        let average = lums.iter().map(|&l| l as f64).sum::<f64>() / count as f64;

        let mut sorted = lums.clone();
        sorted.sort_unstable_by(f32::total_cmp);

        let rank = ((1.0 - average) * count as f64).round().max(0.0) as usize;
        let threshold = sorted.get(rank).copied().unwrap_or(f32::INFINITY);

        for (px, &lum) in self.as_bytes_mut().chunks_exact_mut(4).zip(&lums) {
            set_bilevel(px, lum >= threshold);
        }
        tracing::trace!(average, threshold, "Brightness-preserving threshold");
    }
}

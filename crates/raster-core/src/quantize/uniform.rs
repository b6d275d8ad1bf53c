use crate::image::RasterImage;

/// Bucket width for red and green.
pub const RED_GREEN_BUCKET: u8 = 32;
/// Bucket width for blue (4 levels).
pub const BLUE_BUCKET: u8 = 64;

impl RasterImage {
    /// Uniform quantization: snap each channel down to its bucket start.
    ///
    /// Red and green use buckets of [`RED_GREEN_BUCKET`], blue of
    /// [`BLUE_BUCKET`], giving 8 x 8 x 4 colors. Alpha is kept.
    pub fn quant_uniform(&mut self) {
        for px in self.as_bytes_mut().chunks_exact_mut(4) {
            px[0] = px[0] / RED_GREEN_BUCKET * RED_GREEN_BUCKET;
            px[1] = px[1] / RED_GREEN_BUCKET * RED_GREEN_BUCKET;
            px[2] = px[2] / BLUE_BUCKET * BLUE_BUCKET;
        }
        tracing::debug!(width = self.width(), height = self.height(), "Applied uniform quantization");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucketing() {
        let mut image =
            RasterImage::from_rgba(2, 1, vec![255, 31, 63, 200, 32, 100, 200, 0]).unwrap();
        image.quant_uniform();
        assert_eq!(image.as_bytes(), &[224, 0, 0, 200, 32, 96, 192, 0]);
    }

    #[test]
    fn test_distinct_color_bound() {
        let mut image = RasterImage::new(64, 64);
        for y in 0..64 {
            for x in 0..64 {
                image.set_pixel(x, y, [(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8, 255]);
            }
        }
        image.quant_uniform();
        let distinct: std::collections::HashSet<_> = image.pixels().collect();
        assert!(distinct.len() <= 8 * 8 * 4);
    }
}

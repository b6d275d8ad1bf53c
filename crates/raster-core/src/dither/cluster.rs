use crate::color::normalized_luminance;
use crate::image::RasterImage;

use super::set_bilevel;

/// 4x4 clustered-dot threshold matrix, indexed `[x % 4][y % 4]`.
pub const CLUSTER_MATRIX: [[f32; 4]; 4] = [
    [0.7500, 0.3750, 0.6250, 0.2500],
    [0.0625, 1.0000, 0.8750, 0.4375],
    [0.5000, 0.8125, 0.9375, 0.1250],
    [0.1875, 0.5625, 0.3125, 0.6875],
];

impl RasterImage {
    /// Ordered dithering with the clustered-dot matrix.
    ///
    /// A pixel is white when its normalized luminance is at least the
    /// matrix cell it falls on.
    pub fn dither_cluster(&mut self) {
        let width = self.width();
        for (i, px) in self.as_bytes_mut().chunks_exact_mut(4).enumerate() {
            let (x, y) = (i % width, i / width);
            let lum = normalized_luminance(px[0], px[1], px[2]);
            set_bilevel(px, lum >= CLUSTER_MATRIX[x % 4][y % 4]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mid_gray_follows_matrix() {
        let mut image = RasterImage::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                image.set_pixel(x, y, [128, 128, 128, 255]);
            }
        }
        image.dither_cluster();
        // 128/255 ~= 0.502: white exactly where the matrix cell <= 0.5
        for y in 0..4 {
            for x in 0..4 {
                let expected = if CLUSTER_MATRIX[x][y] <= 0.502 { 255 } else { 0 };
                assert_eq!(image.pixel(x, y)[0], expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_matrix_tiles() {
        let mut image = RasterImage::new(8, 5);
        for y in 0..5 {
            for x in 0..8 {
                image.set_pixel(x, y, [200, 200, 200, 255]);
            }
        }
        image.dither_cluster();
        for y in 0..5 {
            for x in 0..4 {
                assert_eq!(image.pixel(x, y), image.pixel(x + 4, y));
            }
        }
        assert_eq!(image.pixel(1, 0), image.pixel(1, 4));
    }

    #[test]
    fn test_white_always_white() {
        let mut image = RasterImage::from_rgba(1, 1, vec![255, 255, 255, 255]).unwrap();
        image.dither_cluster();
        assert_eq!(image.pixel(0, 0), [255, 255, 255, 255]);
    }
}

use crate::color::{luminance, round_channel};
use crate::image::RasterImage;

impl RasterImage {
    /// Replace R, G and B with the rounded BT.601 luminance. Alpha is kept.
    pub fn to_grayscale(&mut self) {
        for px in self.as_bytes_mut().chunks_exact_mut(4) {
            let gray = round_channel(luminance(px[0], px[1], px[2]));
            px[..3].fill(gray);
        }
        tracing::debug!(width = self.width(), height = self.height(), "Converted to grayscale");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries_and_transparent_white() {
        let mut image = RasterImage::from_rgba(
            2,
            2,
            vec![
                255, 0, 0, 255, //
                0, 255, 0, 255, //
                0, 0, 255, 255, //
                255, 255, 255, 0,
            ],
        )
        .unwrap();
        image.to_grayscale();
        assert_eq!(
            image.as_bytes(),
            &[
                76, 76, 76, 255, //
                150, 150, 150, 255, //
                29, 29, 29, 255, //
                255, 255, 255, 0,
            ]
        );
    }

    #[test]
    fn test_gray_input_is_fixed_point() {
        let mut image = RasterImage::from_rgba(1, 1, vec![93, 93, 93, 17]).unwrap();
        image.to_grayscale();
        assert_eq!(image.pixel(0, 0), [93, 93, 93, 17]);
    }
}

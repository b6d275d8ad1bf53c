use rand::Rng;

use crate::color::normalized_luminance;
use crate::image::RasterImage;

use super::threshold::THRESHOLD;
use super::{set_bilevel, DitherOptions};

impl RasterImage {
    /// Random dithering: add uniform noise in
    /// `[-noise_amplitude, noise_amplitude]` to luminance, then threshold.
    pub fn dither_random<R: Rng + ?Sized>(&mut self, options: &DitherOptions, rng: &mut R) {
        let amplitude = options.noise_amplitude.abs();
        for px in self.as_bytes_mut().chunks_exact_mut(4) {
            let noise = (rng.gen::<f32>() * 2.0 - 1.0) * amplitude;
            let lum = normalized_luminance(px[0], px[1], px[2]) + noise;
            set_bilevel(px, lum >= THRESHOLD);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gray(size: usize, value: u8) -> RasterImage {
        let data = [value, value, value, 255]
            .iter()
            .copied()
            .cycle()
            .take(size * size * 4)
            .collect();
        RasterImage::from_rgba(size, size, data).unwrap()
    }

    #[test]
    fn test_same_seed_same_output() {
        let mut a = gray(16, 128);
        let mut b = a.clone();
        a.dither_random(&DitherOptions::new(), &mut StdRng::seed_from_u64(7));
        b.dither_random(&DitherOptions::new(), &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_mid_gray_mixes() {
        let mut image = gray(32, 128);
        image.dither_random(&DitherOptions::new(), &mut StdRng::seed_from_u64(1));
        let white = image.pixels().filter(|px| px[0] == 255).count();
        assert!(white > 0 && white < 32 * 32);
    }

    #[test]
    fn test_noise_cannot_flip_extremes() {
        // Black + 0.2 < 0.5 and white - 0.2 >= 0.5 for every draw.
        let mut black = gray(8, 0);
        let mut white = gray(8, 255);
        let mut rng = StdRng::seed_from_u64(3);
        black.dither_random(&DitherOptions::new(), &mut rng);
        white.dither_random(&DitherOptions::new(), &mut rng);
        assert!(black.pixels().all(|px| px[..3] == [0, 0, 0]));
        assert!(white.pixels().all(|px| px[..3] == [255, 255, 255]));
    }

    #[test]
    fn test_zero_amplitude_is_threshold() {
        let mut a = gray(4, 140);
        let mut b = a.clone();
        a.dither_random(
            &DitherOptions::new().noise_amplitude(0.0),
            &mut StdRng::seed_from_u64(9),
        );
        b.dither_threshold();
        assert_eq!(a, b);
    }
}

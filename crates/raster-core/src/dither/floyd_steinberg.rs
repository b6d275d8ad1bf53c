//! Floyd-Steinberg error diffusion.
//!
//! Used twice: on luminance for bilevel output, and per channel onto the
//! uniform-quantization levels for color output.

use crate::color::{luminance, round_channel};
use crate::image::RasterImage;

use super::DitherOptions;

/// Output levels for red and green in color dithering.
pub const RED_GREEN_LEVELS: u8 = 8;
/// Output levels for blue in color dithering.
pub const BLUE_LEVELS: u8 = 4;

/// Floyd-Steinberg weights as `(dx, dy, weight)` for a left-to-right scan.
///
/// ```text
///        X   7
///    3   5   1
/// ```
const FLOYD_STEINBERG: [(isize, isize, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

/// Diffuse quantization error over an interleaved `channels`-wide buffer.
///
/// `quantize(channel, value)` picks the output value for one sample; the
/// difference is pushed to unvisited neighbours. With `serpentine` odd rows
/// run right-to-left and the kernel is mirrored.
fn diffuse<Q>(
    buffer: &mut [f32],
    channels: usize,
    width: usize,
    height: usize,
    serpentine: bool,
    quantize: Q,
) where
    Q: Fn(usize, f32) -> f32,
{
    for y in 0..height {
        let going_right = !serpentine || y % 2 == 0;
        for step in 0..width {
            let x = if going_right { step } else { width - 1 - step };
            for c in 0..channels {
                let idx = (y * width + x) * channels + c;
                let old = buffer[idx];
                let new = quantize(c, old);
                buffer[idx] = new;
                let error = old - new;

                for &(dx, dy, weight) in &FLOYD_STEINBERG {
                    let dx = if going_right { dx } else { -dx };
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if nx < 0 || nx >= width as isize || ny >= height as isize {
                        continue;
                    }
                    buffer[(ny as usize * width + nx as usize) * channels + c] += error * weight;
                }
            }
        }
    }
}

/// Nearest of `levels` evenly spaced values across 0..=255.
#[inline]
fn nearest_level(value: f32, levels: u8) -> f32 {
    let step = 255.0 / (levels - 1) as f32;
    let index = (value / step).round().clamp(0.0, (levels - 1) as f32);
    (index * step).round()
}

impl RasterImage {
    /// Floyd-Steinberg dithering of luminance to black and white.
    pub fn dither_fs(&mut self, options: &DitherOptions) {
        let (width, height) = (self.width(), self.height());
        let mut lums: Vec<f32> = self
            .pixels()
            .map(|px| luminance(px[0], px[1], px[2]))
            .collect();

        diffuse(&mut lums, 1, width, height, options.serpentine, |_, v| {
            if v < 127.5 {
                0.0
            } else {
                255.0
            }
        });

        for (px, &v) in self.as_bytes_mut().chunks_exact_mut(4).zip(&lums) {
            px[..3].fill(round_channel(v));
        }
    }

    /// Floyd-Steinberg dithering of each channel onto the uniform
    /// quantization levels: [`RED_GREEN_LEVELS`] for red and green,
    /// [`BLUE_LEVELS`] for blue.
    pub fn dither_color(&mut self, options: &DitherOptions) {
        let (width, height) = (self.width(), self.height());
        let mut rgb: Vec<f32> = self
            .pixels()
            .flat_map(|px| [px[0] as f32, px[1] as f32, px[2] as f32])
            .collect();

        diffuse(&mut rgb, 3, width, height, options.serpentine, |c, v| {
            let levels = if c == 2 { BLUE_LEVELS } else { RED_GREEN_LEVELS };
            nearest_level(v, levels)
        });

        for (px, v) in self.as_bytes_mut().chunks_exact_mut(4).zip(rgb.chunks_exact(3)) {
            for c in 0..3 {
                px[c] = round_channel(v[c]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: usize, height: usize, rgba: [u8; 4]) -> RasterImage {
        let data = rgba.iter().copied().cycle().take(width * height * 4).collect();
        RasterImage::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn test_nearest_level() {
        assert_eq!(nearest_level(0.0, 8), 0.0);
        assert_eq!(nearest_level(40.0, 8), 36.0);
        assert_eq!(nearest_level(250.0, 8), 255.0);
        assert_eq!(nearest_level(100.0, 4), 85.0);
        assert_eq!(nearest_level(-30.0, 4), 0.0);
        assert_eq!(nearest_level(400.0, 4), 255.0);
    }

    #[test]
    fn test_fs_pure_black_and_white() {
        let mut black = uniform(6, 6, [0, 0, 0, 255]);
        let mut white = uniform(6, 6, [255, 255, 255, 255]);
        black.dither_fs(&DitherOptions::new());
        white.dither_fs(&DitherOptions::new());
        assert!(black.pixels().all(|px| px == [0, 0, 0, 255]));
        assert!(white.pixels().all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn test_fs_preserves_average_brightness() {
        let size = 32;
        let mut image = uniform(size, size, [77, 77, 77, 255]);
        image.dither_fs(&DitherOptions::new());
        let white = image.pixels().filter(|px| px[0] == 255).count();
        let ratio = white as f32 / (size * size) as f32;
        assert!((ratio - 77.0 / 255.0).abs() < 0.05, "ratio = {ratio}");
        assert!(image.pixels().all(|px| px[0] == 0 || px[0] == 255));
    }

    #[test]
    fn test_fs_keeps_alpha() {
        let mut image = uniform(3, 3, [128, 128, 128, 42]);
        image.dither_fs(&DitherOptions::new().serpentine(false));
        assert!(image.pixels().all(|px| px[3] == 42));
    }

    #[test]
    fn test_color_outputs_only_levels() {
        let mut image = RasterImage::new(16, 16);
        for y in 0..16 {
            for x in 0..16 {
                image.set_pixel(x, y, [(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8, 255]);
            }
        }
        image.dither_color(&DitherOptions::new());
        let red_green = [0, 36, 73, 109, 146, 182, 219, 255];
        let blue = [0, 85, 170, 255];
        for px in image.pixels() {
            assert!(red_green.contains(&px[0]), "red {}", px[0]);
            assert!(red_green.contains(&px[1]), "green {}", px[1]);
            assert!(blue.contains(&px[2]), "blue {}", px[2]);
        }
    }

    #[test]
    fn test_color_exact_levels_unchanged() {
        let mut image = uniform(4, 4, [73, 219, 170, 255]);
        image.dither_color(&DitherOptions::new());
        assert!(image.pixels().all(|px| px == [73, 219, 170, 255]));
    }
}

//! Multi-pass painterly renderer.

use rand::Rng;

use crate::color::clamp_channel;
use crate::error::ImageError;
use crate::image::RasterImage;

use super::Stroke;

/// Brush radii used when none are configured, largest first.
pub const DEFAULT_RADII: [u32; 3] = [7, 3, 1];

/// Mean difference a grid cell must exceed to receive a stroke.
pub const DEFAULT_ERROR_THRESHOLD: u32 = 25;

/// Configuration for [`RasterImage::npr_paint`].
///
/// # Defaults
///
/// - Radii: `[7, 3, 1]`
/// - Error threshold: 25
/// - Grid factor: 1.0 (grid spacing equals the brush radius)
///
/// # Example
///
/// ```
/// use raster_core::PaintOptions;
///
/// let options = PaintOptions::new().radii(vec![4, 2]).error_threshold(10);
/// assert_eq!(options.radii, vec![4, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PaintOptions {
    /// Brush radii. Passes always run largest first.
    pub radii: Vec<u32>,
    /// Cells whose summed difference divided by the cell area exceeds this
    /// value get a stroke.
    pub error_threshold: u32,
    /// Grid spacing as a multiple of the brush radius (at least 1 pixel).
    pub grid_factor: f32,
}

impl Default for PaintOptions {
    fn default() -> Self {
        Self {
            radii: DEFAULT_RADII.to_vec(),
            error_threshold: DEFAULT_ERROR_THRESHOLD,
            grid_factor: 1.0,
        }
    }
}

impl PaintOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn radii(mut self, radii: Vec<u32>) -> Self {
        self.radii = radii;
        self
    }

    #[inline]
    pub fn error_threshold(mut self, threshold: u32) -> Self {
        self.error_threshold = threshold;
        self
    }

    #[inline]
    pub fn grid_factor(mut self, factor: f32) -> Self {
        self.grid_factor = factor;
        self
    }

    fn grid_spacing(&self, radius: u32) -> usize {
        let spacing = (self.grid_factor * radius as f32).round();
        if spacing.is_finite() && spacing >= 1.0 {
            spacing as usize
        } else {
            1
        }
    }
}

/// Summed difference over a search window and the position of its maximum.
struct Region {
    sum: u64,
    max_x: usize,
    max_y: usize,
}

/// Per-pixel Euclidean RGB distance between two images, clamped to 255.
fn difference_plane(canvas: &RasterImage, reference: &RasterImage) -> Vec<u8> {
    canvas
        .pixels()
        .zip(reference.pixels())
        .map(|(a, b)| {
            let d2: f32 = (0..3)
                .map(|c| {
                    let d = a[c] as f32 - b[c] as f32;
                    d * d
                })
                .sum();
            clamp_channel(d2.sqrt())
        })
        .collect()
}

/// Scan the `(2 * reach + 1)²` window around `(cx, cy)`.
///
/// Returns `None` when the window lies entirely outside the plane. Ties for
/// the maximum keep the first sample in column-major scan order.
fn scan_region(
    diff: &[u8],
    width: usize,
    height: usize,
    cx: usize,
    cy: usize,
    reach: usize,
) -> Option<Region> {
    let mut region: Option<(Region, u8)> = None;
    let reach = reach as isize;

    for i in -reach..=reach {
        let x = cx as isize + i;
        if x < 0 || x >= width as isize {
            continue;
        }
        for j in -reach..=reach {
            let y = cy as isize + j;
            if y < 0 || y >= height as isize {
                continue;
            }
            let (x, y) = (x as usize, y as usize);
            let value = diff[y * width + x];

            match region.as_mut() {
                None => {
                    region = Some((
                        Region {
                            sum: value as u64,
                            max_x: x,
                            max_y: y,
                        },
                        value,
                    ))
                }
                Some((r, max)) => {
                    r.sum += value as u64;
                    if value > *max {
                        *max = value;
                        r.max_x = x;
                        r.max_y = y;
                    }
                }
            }
        }
    }
    region.map(|(r, _)| r)
}

/// Paint one pass of strokes of `radius` onto `canvas`.
///
/// Returns the number of strokes painted.
fn paint_layer<R: Rng + ?Sized>(
    canvas: &mut RasterImage,
    reference: &RasterImage,
    radius: u32,
    options: &PaintOptions,
    rng: &mut R,
) -> usize {
    let (width, height) = (canvas.width(), canvas.height());
    let diff = difference_plane(canvas, reference);

    let grid = options.grid_spacing(radius);
    let reach = (grid / 2).max(1);
    let area = (grid * grid) as u64;

    let mut candidates = Vec::new();
    for x in (0..width).step_by(grid) {
        for y in (0..height).step_by(grid) {
            let Some(region) = scan_region(&diff, width, height, x + reach, y + reach, reach)
            else {
                continue;
            };
            if region.sum / area > options.error_threshold as u64 {
                candidates.push((region.max_x, region.max_y));
            }
        }
    }

    let painted = candidates.len();
    while !candidates.is_empty() {
        let pick = rng.gen_range(0..candidates.len());
        let (x, y) = candidates.swap_remove(pick);
        canvas.paint_stroke(&Stroke::new(x, y, radius, reference.pixel(x, y)));
    }

    tracing::debug!(radius, grid, strokes = painted, "Painted layer");
    painted
}

impl RasterImage {
    /// Re-render the image as brush strokes.
    ///
    /// Starts from a transparent black canvas. For every radius (largest
    /// first) the original image is blurred with a `(2 * radius + 1)`
    /// Gaussian to form the reference layer, and strokes are painted in
    /// random order wherever the canvas still differs from it. Stroke order
    /// is drawn from `rng`.
    ///
    /// Fails without touching the image if `options.radii` is empty or
    /// contains a zero.
    pub fn npr_paint<R: Rng + ?Sized>(
        &mut self,
        options: &PaintOptions,
        rng: &mut R,
    ) -> Result<(), ImageError> {
        if options.radii.is_empty() || options.radii.contains(&0) {
            return Err(ImageError::InvalidRadius);
        }

        let mut radii = options.radii.clone();
        radii.sort_unstable_by(|a, b| b.cmp(a));

        let mut canvas = RasterImage::new(self.width(), self.height());
        let mut strokes = 0;
        for &radius in &radii {
            let mut reference = self.clone();
            reference.filter_gaussian_n(2 * radius as usize + 1)?;
            strokes += paint_layer(&mut canvas, &reference, radius, options, rng);
        }

        *self = canvas;
        tracing::debug!(passes = radii.len(), strokes, "Painterly rendering done");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn uniform(width: usize, height: usize, rgba: [u8; 4]) -> RasterImage {
        let data = rgba.iter().copied().cycle().take(width * height * 4).collect();
        RasterImage::from_rgba(width, height, data).unwrap()
    }

    fn two_tone(size: usize) -> RasterImage {
        let mut image = uniform(size, size, [20, 40, 200, 255]);
        for y in 0..size {
            for x in size / 2..size {
                image.set_pixel(x, y, [240, 200, 10, 255]);
            }
        }
        image
    }

    #[test]
    fn test_difference_plane() {
        let a = RasterImage::from_rgba(2, 1, vec![0, 0, 0, 0, 255, 255, 255, 255]).unwrap();
        let b = RasterImage::from_rgba(2, 1, vec![3, 4, 0, 9, 0, 0, 0, 0]).unwrap();
        // sqrt(9 + 16) = 5; sqrt(3 * 255²) clamps to 255
        assert_eq!(difference_plane(&a, &b), vec![5, 255]);
    }

    #[test]
    fn test_scan_region_finds_max_and_sum() {
        let mut diff = vec![0u8; 25];
        diff[2 * 5 + 3] = 90;
        diff[2 * 5 + 2] = 10;
        let region = scan_region(&diff, 5, 5, 2, 2, 1).unwrap();
        assert_eq!(region.sum, 100);
        assert_eq!((region.max_x, region.max_y), (3, 2));
    }

    #[test]
    fn test_scan_region_clips_and_misses() {
        let diff = vec![7u8; 4];
        let region = scan_region(&diff, 2, 2, 2, 2, 1).unwrap();
        assert_eq!(region.sum, 7);
        assert_eq!((region.max_x, region.max_y), (1, 1));
        assert!(scan_region(&diff, 2, 2, 5, 5, 1).is_none());
    }

    #[test]
    fn test_layer_matching_reference_paints_nothing() {
        let reference = two_tone(12);
        let mut canvas = reference.clone();
        let mut rng = StdRng::seed_from_u64(1);
        let strokes = paint_layer(&mut canvas, &reference, 3, &PaintOptions::new(), &mut rng);
        assert_eq!(strokes, 0);
        assert_eq!(canvas, reference);
    }

    #[test]
    fn test_layer_on_blank_canvas_paints() {
        let reference = uniform(12, 12, [200, 200, 200, 255]);
        let mut canvas = RasterImage::new(12, 12);
        let mut rng = StdRng::seed_from_u64(1);
        let strokes = paint_layer(&mut canvas, &reference, 3, &PaintOptions::new(), &mut rng);
        assert_eq!(strokes, 16);
        assert_eq!(canvas.pixel(6, 6), [200, 200, 200, 255]);
    }

    #[test]
    fn test_same_seed_same_painting() {
        let options = PaintOptions::new();
        let mut a = two_tone(24);
        let mut b = a.clone();
        a.npr_paint(&options, &mut StdRng::seed_from_u64(11)).unwrap();
        b.npr_paint(&options, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_center_reproduced() {
        let color = [90, 160, 30, 255];
        let mut image = uniform(32, 32, color);
        image
            .npr_paint(&PaintOptions::new(), &mut StdRng::seed_from_u64(5))
            .unwrap();
        assert_eq!(image.pixel(16, 16), color);
    }

    #[test]
    fn test_invalid_radii_rejected_without_change() {
        let mut image = two_tone(8);
        let before = image.clone();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            image.npr_paint(&PaintOptions::new().radii(vec![]), &mut rng),
            Err(ImageError::InvalidRadius)
        );
        assert_eq!(
            image.npr_paint(&PaintOptions::new().radii(vec![3, 0]), &mut rng),
            Err(ImageError::InvalidRadius)
        );
        assert_eq!(image, before);
    }

    #[test]
    fn test_grid_spacing() {
        let options = PaintOptions::new();
        assert_eq!(options.grid_spacing(7), 7);
        assert_eq!(options.grid_spacing(1), 1);
        assert_eq!(options.clone().grid_factor(0.1).grid_spacing(3), 1);
        assert_eq!(options.grid_factor(2.0).grid_spacing(3), 6);
    }
}

//! Convolution over zero-padded planes.

use crate::error::ImageError;
use crate::image::RasterImage;

use super::Kernel;

/// Convolve a `width x height` plane with `kernel`.
///
/// The kernel is flipped in both axes (true convolution, not correlation)
/// and centered at `(kernel.width() / 2, kernel.height() / 2)`. Samples that
/// fall outside the plane contribute nothing. Each output sample is
/// `round(|sum|)` clamped to 255.
///
/// Fails with [`ImageError::PlaneLength`] if `input` does not hold exactly
/// `width * height` samples.
///
/// # Example
///
/// ```
/// use raster_core::convolve::{convolve, Kernel};
///
/// let plane = vec![0, 0, 0, 0, 90, 0, 0, 0, 0];
/// let out = convolve(&plane, 3, 3, &Kernel::identity(3)).unwrap();
/// assert_eq!(out, plane);
/// ```
pub fn convolve(
    input: &[u8],
    width: usize,
    height: usize,
    kernel: &Kernel,
) -> Result<Vec<u8>, ImageError> {
    let expected = width * height;
    if input.len() != expected {
        return Err(ImageError::PlaneLength {
            width,
            height,
            expected,
            actual: input.len(),
        });
    }
    Ok(convolve_plane(input, width, height, kernel))
}

/// Unchecked body of [`convolve`]; `input.len()` must be `width * height`.
fn convolve_plane(input: &[u8], width: usize, height: usize, kernel: &Kernel) -> Vec<u8> {
    let kw = kernel.width();
    let kh = kernel.height();
    let center_x = (kw / 2) as isize;
    let center_y = (kh / 2) as isize;
    let weights = kernel.weights();

    let mut output = vec![0u8; width * height];
    for row in 0..height {
        for col in 0..width {
            let mut sum = 0.0f32;
            for m in 0..kh {
                let flipped_row = kh - 1 - m;
                let src_row = row as isize + m as isize - center_y;
                if src_row < 0 || src_row >= height as isize {
                    continue;
                }
                let src_base = src_row as usize * width;
                for n in 0..kw {
                    let src_col = col as isize + n as isize - center_x;
                    if src_col < 0 || src_col >= width as isize {
                        continue;
                    }
                    let flipped_col = kw - 1 - n;
                    sum += input[src_base + src_col as usize] as f32
                        * weights[flipped_row * kw + flipped_col];
                }
            }
            output[row * width + col] = (sum.abs() + 0.5).min(255.0) as u8;
        }
    }
    output
}

/// Convolve the R, G and B channels of `image` in place. Alpha is untouched.
pub fn convolve_image(image: &mut RasterImage, kernel: &Kernel) {
    let (width, height) = (image.width(), image.height());
    for channel in 0..3 {
        let plane = image.channel_plane(channel);
        let filtered = convolve_plane(&plane, width, height, kernel);
        image.set_channel_plane(channel, &filtered);
    }
    tracing::trace!(
        width,
        height,
        kernel_width = kernel.width(),
        kernel_height = kernel.height(),
        "Convolved image"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_kernel_preserves_plane() {
        let plane: Vec<u8> = (0..20).map(|i| (i * 13) as u8).collect();
        assert_eq!(convolve(&plane, 5, 4, &Kernel::identity(5)).unwrap(), plane);
    }

    #[test]
    fn test_kernel_is_flipped() {
        // Kernel with a single weight at (col 0, row 1) of a 3x3: correlation
        // would pull from the left neighbour, convolution pulls from the right.
        let mut weights = vec![0.0; 9];
        weights[3] = 1.0;
        let kernel = Kernel::new(3, 3, weights).unwrap();

        let plane = vec![10, 20, 30];
        let out = convolve(&plane, 3, 1, &kernel).unwrap();
        assert_eq!(out, vec![20, 30, 0]);
    }

    #[test]
    fn test_out_of_bounds_samples_are_zero() {
        let plane = vec![100u8; 9];
        let kernel = Kernel::new(3, 3, vec![1.0 / 9.0; 9]).unwrap();
        let out = convolve(&plane, 3, 3, &kernel).unwrap();
        // Corner sees 4 of 9 samples, edge 6 of 9, center all 9.
        assert_eq!(out[0], 44);
        assert_eq!(out[1], 67);
        assert_eq!(out[4], 100);
    }

    #[test]
    fn test_negative_sum_takes_magnitude() {
        let kernel = Kernel::new(1, 1, vec![-0.5]).unwrap();
        assert_eq!(convolve(&[100], 1, 1, &kernel).unwrap(), vec![50]);
    }

    #[test]
    fn test_result_saturates() {
        let kernel = Kernel::new(1, 1, vec![3.0]).unwrap();
        assert_eq!(convolve(&[200], 1, 1, &kernel).unwrap(), vec![255]);
    }

    #[test]
    fn test_even_kernel_center() {
        // 2x1 kernel: center index 1, flipped weight 0 lands on the right.
        let kernel = Kernel::new(2, 1, vec![1.0, 0.0]).unwrap();
        let out = convolve(&[1, 2, 3], 3, 1, &kernel).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
    }

    #[test]
    fn test_short_plane_is_error() {
        let kernel = Kernel::identity(3);
        assert_eq!(
            convolve(&[1, 2, 3, 4, 5], 3, 2, &kernel),
            Err(ImageError::PlaneLength {
                width: 3,
                height: 2,
                expected: 6,
                actual: 5
            })
        );
    }

    #[test]
    fn test_convolve_image_leaves_alpha() {
        let mut image = RasterImage::from_rgba(
            2,
            1,
            vec![100, 100, 100, 7, 0, 0, 0, 9],
        )
        .unwrap();
        convolve_image(&mut image, &Kernel::new(1, 1, vec![0.5]).unwrap());
        assert_eq!(image.as_bytes(), &[50, 50, 50, 7, 0, 0, 0, 9]);
    }
}

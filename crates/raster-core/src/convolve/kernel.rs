//! Convolution kernel definitions.

use crate::error::ImageError;

/// 1D Bartlett (triangle) weights; the 5x5 kernel is their outer product.
const BARTLETT_1D: [f32; 5] = [1.0, 2.0, 3.0, 2.0, 1.0];

/// A dense, row-major convolution kernel.
///
/// The kernel center is `(width / 2, height / 2)`, so odd sizes are
/// symmetric around their middle sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    width: usize,
    height: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Build a kernel from row-major weights.
    ///
    /// Fails with [`ImageError::KernelShape`] unless there are exactly
    /// `width * height` weights.
    pub fn new(width: usize, height: usize, weights: Vec<f32>) -> Result<Self, ImageError> {
        if weights.len() != width * height {
            return Err(ImageError::KernelShape {
                width,
                height,
                len: weights.len(),
            });
        }
        Ok(Self::from_parts(width, height, weights))
    }

    fn from_parts(width: usize, height: usize, weights: Vec<f32>) -> Self {
        Self {
            width,
            height,
            weights,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight at column `x`, row `y`.
    #[inline]
    pub fn weight(&self, x: usize, y: usize) -> f32 {
        self.weights[y * self.width + x]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// `size x size` kernel with a single 1 at the center.
    pub fn identity(size: usize) -> Self {
        let mut weights = vec![0.0; size * size];
        if size > 0 {
            weights[(size / 2) * size + size / 2] = 1.0;
        }
        Self::from_parts(size, size, weights)
    }

    /// `size x size` uniform averaging kernel.
    pub fn box_filter(size: usize) -> Self {
        let weight = 1.0 / (size * size) as f32;
        Self::from_parts(size, size, vec![weight; size * size])
    }

    /// 5x5 Bartlett kernel: `{1,2,3,2,1}` outer product, divided by 81.
    pub fn bartlett() -> Self {
        Self::outer(&BARTLETT_1D, 81.0)
    }

    /// `n x n` Gaussian approximated by binomial coefficients `C(n-1, i)`.
    ///
    /// The outer product of the normalized row `C(n-1, i) / 2^(n-1)`, so
    /// the weights sum to one for any size. `n` must be odd so the kernel
    /// has a center sample.
    pub fn gaussian(n: usize) -> Result<Self, ImageError> {
        if n == 0 || n % 2 == 0 {
            return Err(ImageError::InvalidKernelSize(n));
        }
        let row: Vec<f32> = binomial_row(n).into_iter().map(|c| c as f32).collect();
        Ok(Self::outer(&row, 1.0))
    }

    /// 5x5 high-pass kernel: identity minus Bartlett.
    pub fn edge_detect() -> Self {
        Self::identity(5).scaled_minus(1.0, &Self::bartlett())
    }

    /// 5x5 sharpening kernel: the image plus its high-pass, `2 * identity - Bartlett`.
    pub fn enhance() -> Self {
        Self::identity(5).scaled_minus(2.0, &Self::bartlett())
    }

    fn outer(row: &[f32], divisor: f32) -> Self {
        let n = row.len();
        let mut weights = Vec::with_capacity(n * n);
        for &a in row {
            for &b in row {
                weights.push(a * b / divisor);
            }
        }
        Self::from_parts(n, n, weights)
    }

    /// `scale * self - other`, element-wise.
    fn scaled_minus(&self, scale: f32, other: &Kernel) -> Self {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        let weights = self
            .weights
            .iter()
            .zip(&other.weights)
            .map(|(&a, &b)| scale * a - b)
            .collect();
        Self::from_parts(self.width, self.height, weights)
    }
}

/// Row `n - 1` of Pascal's triangle divided by `2^(n-1)`.
///
/// Built by repeated halving so no intermediate exceeds 1. Far tails of
/// large rows underflow to zero.
fn binomial_row(n: usize) -> Vec<f64> {
    let mut row = vec![1.0f64];
    for _ in 1..n {
        let mut next = vec![0.0; row.len() + 1];
        for (i, &c) in row.iter().enumerate() {
            next[i] += c * 0.5;
            next[i + 1] += c * 0.5;
        }
        row = next;
    }
    row
}

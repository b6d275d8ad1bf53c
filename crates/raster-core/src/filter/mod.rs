//! Linear filters built on the convolution engine.
//!
//! Every filter convolves the R, G and B channels independently with a
//! [`Kernel`] and leaves alpha alone. Borders are zero-padded, so edges of
//! the image darken slightly under low-pass filters.

use crate::convolve::{convolve_image, Kernel};
use crate::error::ImageError;
use crate::image::RasterImage;

/// Size of the fixed box, Bartlett, Gaussian, edge and enhance kernels.
pub const FILTER_SIZE: usize = 5;

/// Filter selection for dispatch by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// 5x5 uniform average.
    Box,
    /// 5x5 triangle-weighted average.
    Bartlett,
    /// Binomial Gaussian of the given (odd) size.
    Gaussian(usize),
    /// 5x5 high-pass: image minus its Bartlett blur.
    Edge,
    /// 5x5 sharpen: image plus its high-pass.
    Enhance,
}

impl FilterKind {
    /// Build the kernel for this filter.
    pub fn kernel(self) -> Result<Kernel, ImageError> {
        match self {
            FilterKind::Box => Ok(Kernel::box_filter(FILTER_SIZE)),
            FilterKind::Bartlett => Ok(Kernel::bartlett()),
            FilterKind::Gaussian(n) => Kernel::gaussian(n),
            FilterKind::Edge => Ok(Kernel::edge_detect()),
            FilterKind::Enhance => Ok(Kernel::enhance()),
        }
    }
}

impl RasterImage {
    /// Apply a filter to the color channels.
    pub fn filter(&mut self, kind: FilterKind) -> Result<(), ImageError> {
        let kernel = kind.kernel()?;
        convolve_image(self, &kernel);
        tracing::debug!(filter = ?kind, width = self.width(), height = self.height(), "Applied filter");
        Ok(())
    }

    /// 5x5 box filter.
    pub fn filter_box(&mut self) -> Result<(), ImageError> {
        self.filter(FilterKind::Box)
    }

    /// 5x5 Bartlett filter.
    pub fn filter_bartlett(&mut self) -> Result<(), ImageError> {
        self.filter(FilterKind::Bartlett)
    }

    /// 5x5 Gaussian filter.
    pub fn filter_gaussian(&mut self) -> Result<(), ImageError> {
        self.filter(FilterKind::Gaussian(FILTER_SIZE))
    }

    /// `n x n` Gaussian filter. Fails without touching the image for even `n`.
    pub fn filter_gaussian_n(&mut self, n: usize) -> Result<(), ImageError> {
        self.filter(FilterKind::Gaussian(n))
    }

    /// 5x5 edge detect (high-pass) filter.
    pub fn filter_edge(&mut self) -> Result<(), ImageError> {
        self.filter(FilterKind::Edge)
    }

    /// 5x5 edge enhance filter.
    pub fn filter_enhance(&mut self) -> Result<(), ImageError> {
        self.filter(FilterKind::Enhance)
    }
}

//! 2D convolution of single-channel planes.
//!
//! [`convolve`] is the engine every filter in [`crate::filter`] is built on.
//! Kernels are described by [`Kernel`], which also provides the standard
//! constructors (box, Bartlett, binomial Gaussian, edge detect, enhance).

mod engine;
mod kernel;

pub use engine::{convolve, convolve_image};
pub use kernel::Kernel;

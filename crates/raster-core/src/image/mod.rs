//! The owned RGBA pixel buffer every operation works on.

mod raster;

pub use raster::{RasterImage, CHANNELS};

//! raster-core: transforms over in-memory RGBA images
//!
//! Every operation works on a [`RasterImage`], an owned width x height
//! buffer of premultiplied RGBA8 pixels, and rewrites it in place. Nothing
//! here touches the filesystem; decoding and encoding live in the
//! application crate.
//!
//! # Quick Start
//!
//! ```
//! use raster_core::{DitherMethod, DitherOptions, RasterImage};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut image = RasterImage::new(4, 4);
//! image.set_pixel(1, 1, [200, 200, 200, 255]);
//!
//! image.to_grayscale();
//! image.filter_box().unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! image.dither(DitherMethod::FloydSteinberg, &DitherOptions::new(), &mut rng);
//! ```
//!
//! # Operations
//!
//! - Quantization: [`RasterImage::to_grayscale`], [`RasterImage::quant_uniform`],
//!   [`RasterImage::quant_populosity`]
//! - Dithering: [`RasterImage::dither`] with any [`DitherMethod`]
//! - Compositing: [`RasterImage::composite`] with any [`CompositeOp`]
//! - Filtering: [`RasterImage::filter`] with any [`FilterKind`]
//! - Painterly rendering: [`RasterImage::npr_paint`], built on
//!   [`RasterImage::paint_stroke`]
//!
//! # Randomness
//!
//! Random dithering and stroke ordering take any `rand::Rng` from the
//! caller. Pass a seeded generator for reproducible output.
//!
//! # Errors
//!
//! Operations fail only on structural problems, reported as [`ImageError`].
//! Pixel arithmetic always clamps; it never fails.

pub mod color;
pub mod composite;
pub mod convolve;
pub mod dither;
pub mod error;
pub mod filter;
pub mod image;
pub mod paint;
pub mod quantize;
pub mod transform;


pub use composite::CompositeOp;
pub use convolve::Kernel;
pub use dither::{DitherMethod, DitherOptions};
pub use error::ImageError;
pub use filter::FilterKind;
pub use image::RasterImage;
pub use paint::{PaintOptions, Stroke};
pub use quantize::{ColorKey, PaletteMode, PopulosityOptions};

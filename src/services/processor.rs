use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::SeedableRng;
use raster_core::quantize::histogram;
use raster_core::{CompositeOp, DitherMethod, ImageError, RasterImage};

use crate::models::AppConfig;

/// Unary operation selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    Grayscale,
    QuantUniform,
    QuantPopulosity,
    DitherThreshold,
    DitherRandom,
    DitherFs,
    DitherBright,
    DitherCluster,
    DitherColor,
    FilterBox,
    FilterBartlett,
    FilterGaussian,
    FilterEdge,
    FilterEnhance,
    NprPaint,
    HalfSize,
    DoubleSize,
}

/// Binary compositing operator selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompositeOperator {
    Over,
    In,
    Out,
    Atop,
    Xor,
    Difference,
}

impl From<CompositeOperator> for CompositeOp {
    fn from(op: CompositeOperator) -> Self {
        match op {
            CompositeOperator::Over => CompositeOp::Over,
            CompositeOperator::In => CompositeOp::In,
            CompositeOperator::Out => CompositeOp::Out,
            CompositeOperator::Atop => CompositeOp::Atop,
            CompositeOperator::Xor => CompositeOp::Xor,
            CompositeOperator::Difference => CompositeOp::Difference,
        }
    }
}

/// Summary printed by `rasterlab info`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: usize,
    pub height: usize,
    pub distinct_colors: usize,
}

impl ImageInfo {
    pub fn of(image: &RasterImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            distinct_colors: histogram(image).len(),
        }
    }
}

/// Runs operations on images with the configured tuning and one shared RNG
pub struct Processor {
    config: AppConfig,
    rng: StdRng,
}

impl Processor {
    /// `seed` overrides the configured seed; with neither, the RNG is seeded
    /// from entropy.
    pub fn new(config: AppConfig, seed: Option<u64>) -> Self {
        let rng = match seed.or(config.seed) {
            Some(seed) => {
                tracing::debug!(seed, "Using fixed RNG seed");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Apply a unary operation in place
    pub fn apply(&mut self, image: &mut RasterImage, op: Operation) -> Result<(), ImageError> {
        tracing::debug!(operation = ?op, "Applying operation");
        match op {
            Operation::Grayscale => image.to_grayscale(),
            Operation::QuantUniform => image.quant_uniform(),
            Operation::QuantPopulosity => {
                image.quant_populosity(&self.config.populosity_options())
            }
            Operation::DitherThreshold => self.dither(image, DitherMethod::Threshold),
            Operation::DitherRandom => self.dither(image, DitherMethod::Random),
            Operation::DitherFs => self.dither(image, DitherMethod::FloydSteinberg),
            Operation::DitherBright => self.dither(image, DitherMethod::Bright),
            Operation::DitherCluster => self.dither(image, DitherMethod::Cluster),
            Operation::DitherColor => self.dither(image, DitherMethod::Color),
            Operation::FilterBox => image.filter_box()?,
            Operation::FilterBartlett => image.filter_bartlett()?,
            Operation::FilterGaussian => image.filter_gaussian()?,
            Operation::FilterEdge => image.filter_edge()?,
            Operation::FilterEnhance => image.filter_enhance()?,
            Operation::NprPaint => image.npr_paint(&self.config.paint_options(), &mut self.rng)?,
            Operation::HalfSize => image.half_size()?,
            Operation::DoubleSize => image.double_size()?,
        }
        Ok(())
    }

    fn dither(&mut self, image: &mut RasterImage, method: DitherMethod) {
        image.dither(method, &self.config.dither_options(), &mut self.rng);
    }

    /// N x N Gaussian blur
    pub fn gaussian_n(&mut self, image: &mut RasterImage, size: usize) -> Result<(), ImageError> {
        image.filter_gaussian_n(size)
    }

    pub fn resize(&mut self, image: &mut RasterImage, scale: f32) -> Result<(), ImageError> {
        image.resize(scale)
    }

    pub fn rotate(&mut self, image: &mut RasterImage, angle: f32) -> Result<(), ImageError> {
        image.rotate(angle)
    }

    /// Combine `image` with `other`, writing into `image`
    pub fn composite(
        &mut self,
        image: &mut RasterImage,
        op: CompositeOperator,
        other: &RasterImage,
    ) -> Result<(), ImageError> {
        image.composite(op.into(), other)
    }
}

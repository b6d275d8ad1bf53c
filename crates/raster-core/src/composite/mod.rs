//! Porter-Duff compositing and image difference.
//!
//! Each operator combines this image (F) with a second image (G) of the same
//! size and writes the result into F. Channels are premultiplied, so one
//! formula covers R, G, B and A. With `af = F.a / 255` and `ag = G.a / 255`:
//!
//! | Operator | Result per channel |
//! |----------|--------------------|
//! | Over     | `F + (1 - af) * G` |
//! | In       | `ag == 0`: G; `0 < ag < 1`: `ag * F`; `ag == 1`: F |
//! | Out      | `ag == 1`: 0; `0 < ag < 1`: `(1 - ag) * F`; `ag == 0`: F |
//! | Atop     | see [`RasterImage::comp_atop`] |
//! | Xor      | `(1 - ag) * F + (1 - af) * G` |
//!
//! The boundary cases of In, Out and Atop branch on exact alpha values 0 and
//! 255 rather than following the continuous formulas; existing outputs
//! depend on that.
//!
//! Results are rounded and clamped into 0..=255. On a size mismatch the
//! operator logs a warning, changes nothing and returns
//! [`ImageError::DimensionMismatch`].

use crate::color::{round_channel, to_rgb};
use crate::error::ImageError;
use crate::image::{RasterImage, CHANNELS};

/// Binary operator selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeOp {
    Over,
    In,
    Out,
    Atop,
    Xor,
    /// Absolute per-channel difference of the opaque RGB views.
    Difference,
}

impl CompositeOp {
    fn name(self) -> &'static str {
        match self {
            CompositeOp::Over => "over",
            CompositeOp::In => "in",
            CompositeOp::Out => "out",
            CompositeOp::Atop => "atop",
            CompositeOp::Xor => "xor",
            CompositeOp::Difference => "difference",
        }
    }
}

#[inline]
fn scale(value: u8, factor: f32) -> f32 {
    value as f32 * factor
}

impl RasterImage {
    /// Apply `op` with `other` as the second operand.
    pub fn composite(&mut self, op: CompositeOp, other: &RasterImage) -> Result<(), ImageError> {
        if let Err(err) = self.check_same_size(other) {
            tracing::warn!(operator = op.name(), %err, "Composite rejected");
            return Err(err);
        }

        match op {
            CompositeOp::Over => self.blend(other, over),
            CompositeOp::In => self.blend(other, inside),
            CompositeOp::Out => self.blend(other, outside),
            CompositeOp::Atop => self.blend(other, atop),
            CompositeOp::Xor => self.blend(other, xor),
            CompositeOp::Difference => self.difference_with(other),
        }

        tracing::debug!(
            operator = op.name(),
            width = self.width(),
            height = self.height(),
            "Composited images"
        );
        Ok(())
    }

    /// Composite this image over `other`.
    pub fn comp_over(&mut self, other: &RasterImage) -> Result<(), ImageError> {
        self.composite(CompositeOp::Over, other)
    }

    /// Composite this image inside `other`.
    pub fn comp_in(&mut self, other: &RasterImage) -> Result<(), ImageError> {
        self.composite(CompositeOp::In, other)
    }

    /// Composite this image outside `other`.
    pub fn comp_out(&mut self, other: &RasterImage) -> Result<(), ImageError> {
        self.composite(CompositeOp::Out, other)
    }

    /// Composite this image atop `other`.
    ///
    /// | `ag`   | `af`   | Result |
    /// |--------|--------|--------|
    /// | 0      | not 1  | `(1 - af) * G` |
    /// | 0      | 1      | transparent black |
    /// | not 0  | 1      | `ag * F` |
    /// | not 0  | not 1  | `ag * F + (1 - af) * G` |
    pub fn comp_atop(&mut self, other: &RasterImage) -> Result<(), ImageError> {
        self.composite(CompositeOp::Atop, other)
    }

    /// Composite this image and `other` with exclusive or.
    pub fn comp_xor(&mut self, other: &RasterImage) -> Result<(), ImageError> {
        self.composite(CompositeOp::Xor, other)
    }

    /// Replace this image with `|rgb(F) - rgb(G)|` per channel, fully opaque.
    pub fn difference(&mut self, other: &RasterImage) -> Result<(), ImageError> {
        self.composite(CompositeOp::Difference, other)
    }

    fn blend(&mut self, other: &RasterImage, op: fn(&mut [u8], &[u8])) {
        for (f, g) in self
            .as_bytes_mut()
            .chunks_exact_mut(CHANNELS)
            .zip(other.as_bytes().chunks_exact(CHANNELS))
        {
            op(f, g);
        }
    }

    fn difference_with(&mut self, other: &RasterImage) {
        for (f, g) in self
            .as_bytes_mut()
            .chunks_exact_mut(CHANNELS)
            .zip(other.as_bytes().chunks_exact(CHANNELS))
        {
            let a = to_rgb([f[0], f[1], f[2], f[3]]);
            let b = to_rgb([g[0], g[1], g[2], g[3]]);
            for c in 0..3 {
                f[c] = a[c].abs_diff(b[c]);
            }
            f[3] = 255;
        }
    }
}

fn over(f: &mut [u8], g: &[u8]) {
    let keep_g = 1.0 - f[3] as f32 / 255.0;
    for c in 0..CHANNELS {
        f[c] = round_channel(f[c] as f32 + scale(g[c], keep_g));
    }
}

fn inside(f: &mut [u8], g: &[u8]) {
    match g[3] {
        0 => f.copy_from_slice(g),
        255 => {}
        alpha => {
            let ag = alpha as f32 / 255.0;
            for v in f.iter_mut() {
                *v = round_channel(scale(*v, ag));
            }
        }
    }
}

fn outside(f: &mut [u8], g: &[u8]) {
    match g[3] {
        255 => f.fill(0),
        0 => {}
        alpha => {
            let keep = 1.0 - alpha as f32 / 255.0;
            for v in f.iter_mut() {
                *v = round_channel(scale(*v, keep));
            }
        }
    }
}

fn atop(f: &mut [u8], g: &[u8]) {
    let ag = g[3] as f32 / 255.0;
    let keep_g = 1.0 - f[3] as f32 / 255.0;
    let f_opaque = f[3] == 255;

    if g[3] == 0 {
        if f_opaque {
            f.fill(0);
        } else {
            for c in 0..CHANNELS {
                f[c] = round_channel(scale(g[c], keep_g));
            }
        }
    } else if f_opaque {
        for v in f.iter_mut() {
            *v = round_channel(scale(*v, ag));
        }
    } else {
        for c in 0..CHANNELS {
            f[c] = round_channel(scale(f[c], ag) + scale(g[c], keep_g));
        }
    }
}

fn xor(f: &mut [u8], g: &[u8]) {
    let keep_f = 1.0 - g[3] as f32 / 255.0;
    let keep_g = 1.0 - f[3] as f32 / 255.0;
    for c in 0..CHANNELS {
        f[c] = round_channel(scale(f[c], keep_f) + scale(g[c], keep_g));
    }
}

//! Per-pixel color math.
//!
//! Pixels are stored with color channels premultiplied by alpha. These
//! helpers recover an opaque RGB view against a black background and compute
//! BT.601 luminance, and provide the channel clamping every writer goes
//! through.

mod alpha;
mod luma;

pub use alpha::{premultiply, to_rgb, BACKGROUND};
pub use luma::{luminance, normalized_luminance};

/// Clamp a computed value into a channel, truncating the fraction.
#[inline]
pub fn clamp_channel(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 255.0) as u8
}

/// Clamp a computed value into a channel, rounding to nearest.
#[inline]
pub fn round_channel(value: f32) -> u8 {
    clamp_channel(value.round())
}

//! Luminance using ITU-R BT.601 weights.

const WEIGHT_R: f32 = 0.299;
const WEIGHT_G: f32 = 0.587;
const WEIGHT_B: f32 = 0.114;

/// Luminance of a pixel on the 0..=255 scale.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    WEIGHT_R * r as f32 + WEIGHT_G * g as f32 + WEIGHT_B * b as f32
}

/// Luminance of a pixel normalized to 0.0..=1.0.
#[inline]
pub fn normalized_luminance(r: u8, g: u8, b: u8) -> f32 {
    luminance(r, g, b) / 255.0
}

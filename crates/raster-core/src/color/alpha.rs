//! Alpha handling: premultiplication and the RGBA to RGB view.

/// Color shown where a pixel is fully transparent.
pub const BACKGROUND: [u8; 3] = [0, 0, 0];

/// Divide alpha out of a premultiplied pixel, compositing onto [`BACKGROUND`].
///
/// Each color channel is scaled by `255 / alpha`, floored and clamped. A
/// fully transparent pixel yields the background color.
pub fn to_rgb(rgba: [u8; 4]) -> [u8; 3] {
    let alpha = rgba[3];
    if alpha == 0 {
        return BACKGROUND;
    }

    let scale = 255.0 / alpha as f32;
    let mut rgb = [0u8; 3];
    for (out, &c) in rgb.iter_mut().zip(&rgba[..3]) {
        *out = (c as f32 * scale).floor().clamp(0.0, 255.0) as u8;
    }
    rgb
}

/// Multiply color channels of a straight-alpha pixel by its alpha.
///
/// Inverse of [`to_rgb`] for opaque pixels; used when pixels enter memory
/// from a file.
pub fn premultiply(rgba: [u8; 4]) -> [u8; 4] {
    let alpha = rgba[3] as u16;
    let scale = |c: u8| ((c as u16 * alpha + 127) / 255) as u8;
    [scale(rgba[0]), scale(rgba[1]), scale(rgba[2]), rgba[3]]
}

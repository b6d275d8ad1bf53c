//! PNG through the `png` crate, normalized to 8-bit RGBA.

use std::io::Cursor;

use ::png::{BitDepth, ColorType, Transformations};

use super::{RawImage, RowOrder};
use crate::error::CodecError;

/// Decode any PNG color type into straight RGBA, top row first.
pub fn decode(bytes: &[u8]) -> Result<RawImage, CodecError> {
    let mut decoder = ::png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| CodecError::PngDecode(e.to_string()))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| CodecError::PngDecode(e.to_string()))?;
    let (width, height) = (frame.width as usize, frame.height as usize);
    if width == 0 || height == 0 {
        return Err(CodecError::ZeroDimensions);
    }
    if frame.bit_depth != BitDepth::Eight {
        return Err(CodecError::PngDecode(format!(
            "unexpected bit depth {:?} after expansion",
            frame.bit_depth
        )));
    }

    let samples = &buf[..frame.buffer_size()];
    let mut data = Vec::with_capacity(width * height * 4);
    match frame.color_type {
        ColorType::Rgba => data.extend_from_slice(samples),
        ColorType::Rgb => {
            for px in samples.chunks_exact(3) {
                data.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
        }
        ColorType::GrayscaleAlpha => {
            for px in samples.chunks_exact(2) {
                data.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
            }
        }
        ColorType::Grayscale => {
            for &v in samples {
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        ColorType::Indexed => {
            return Err(CodecError::PngDecode(
                "indexed data was not expanded".to_string(),
            ))
        }
    }

    tracing::debug!(width, height, color_type = ?frame.color_type, "Decoded PNG");

    Ok(RawImage {
        width,
        height,
        order: RowOrder::TopDown,
        data,
    })
}

/// Encode straight RGBA as an 8-bit RGBA PNG. Rows must be top row first.
pub fn encode(raw: &RawImage) -> Result<Vec<u8>, CodecError> {
    let too_large = || CodecError::TooLarge {
        width: raw.width,
        height: raw.height,
    };
    let width = u32::try_from(raw.width).map_err(|_| too_large())?;
    let height = u32::try_from(raw.height).map_err(|_| too_large())?;
    if width == 0 || height == 0 {
        return Err(CodecError::ZeroDimensions);
    }

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = ::png::Encoder::new(&mut buf, width, height);
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .map_err(|e| CodecError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&raw.data)
            .map_err(|e| CodecError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

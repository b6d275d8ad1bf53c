//! Truecolor TGA: uncompressed (type 2) and run-length encoded (type 10).

use super::{RawImage, RowOrder};
use crate::error::CodecError;

const HEADER_LEN: usize = 18;

const TYPE_TRUECOLOR: u8 = 2;
const TYPE_TRUECOLOR_RLE: u8 = 10;

/// Descriptor bit set when row 0 is the top of the image.
const ORIGIN_TOP: u8 = 0x20;
/// Alpha depth written into the descriptor of 32-bit output.
const ALPHA_BITS: u8 = 8;

struct Header {
    id_len: usize,
    color_map_type: u8,
    image_type: u8,
    width: usize,
    height: usize,
    bits_per_pixel: u8,
    descriptor: u8,
}

impl Header {
    fn parse(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() < HEADER_LEN {
            return Err(CodecError::TruncatedHeader(bytes.len()));
        }
        let le16 = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]) as usize;
        Ok(Self {
            id_len: bytes[0] as usize,
            color_map_type: bytes[1],
            image_type: bytes[2],
            width: le16(12),
            height: le16(14),
            bits_per_pixel: bytes[16],
            descriptor: bytes[17],
        })
    }
}

/// Decode a TGA file into straight RGBA rows in file order.
pub fn decode(bytes: &[u8]) -> Result<RawImage, CodecError> {
    let header = Header::parse(bytes)?;

    if header.color_map_type != 0 {
        return Err(CodecError::ColorMapped);
    }
    let bytes_per_pixel = match header.bits_per_pixel {
        24 => 3,
        32 => 4,
        other => return Err(CodecError::UnsupportedDepth(other)),
    };
    if header.width == 0 || header.height == 0 {
        return Err(CodecError::ZeroDimensions);
    }

    let body_start = HEADER_LEN + header.id_len;
    let body = bytes.get(body_start..).ok_or(CodecError::TruncatedData {
        expected: body_start,
        actual: bytes.len(),
    })?;

    let pixels = header.width * header.height;
    let packed = match header.image_type {
        TYPE_TRUECOLOR => {
            let expected = pixels * bytes_per_pixel;
            body.get(..expected)
                .ok_or(CodecError::TruncatedData {
                    expected,
                    actual: body.len(),
                })?
                .to_vec()
        }
        TYPE_TRUECOLOR_RLE => unpack_rle(body, pixels, bytes_per_pixel)?,
        other => return Err(CodecError::UnsupportedImageType(other)),
    };

    let mut data = Vec::with_capacity(pixels * 4);
    for px in packed.chunks_exact(bytes_per_pixel) {
        let alpha = if bytes_per_pixel == 4 { px[3] } else { 255 };
        data.extend_from_slice(&[px[2], px[1], px[0], alpha]);
    }

    let order = if header.descriptor & ORIGIN_TOP != 0 {
        RowOrder::TopDown
    } else {
        RowOrder::BottomUp
    };

    tracing::debug!(
        image_type = header.image_type,
        width = header.width,
        height = header.height,
        bits = header.bits_per_pixel,
        ?order,
        "Decoded TGA"
    );

    Ok(RawImage {
        width: header.width,
        height: header.height,
        order,
        data,
    })
}

/// Expand run-length packets into `pixels` packed pixels.
fn unpack_rle(body: &[u8], pixels: usize, bytes_per_pixel: usize) -> Result<Vec<u8>, CodecError> {
    let expected = pixels * bytes_per_pixel;
    // The header size is untrusted; grow with the packets that actually exist.
    let mut out = Vec::new();
    let mut pos = 0;
    let truncated = |pos: usize| CodecError::TruncatedData {
        expected: pos,
        actual: body.len(),
    };

    while out.len() < expected {
        let packet = *body.get(pos).ok_or_else(|| truncated(pos + 1))?;
        pos += 1;
        let count = (packet & 0x7f) as usize + 1;

        if packet & 0x80 != 0 {
            let px = body
                .get(pos..pos + bytes_per_pixel)
                .ok_or_else(|| truncated(pos + bytes_per_pixel))?;
            for _ in 0..count {
                out.extend_from_slice(px);
            }
            pos += bytes_per_pixel;
        } else {
            let len = count * bytes_per_pixel;
            let run = body.get(pos..pos + len).ok_or_else(|| truncated(pos + len))?;
            out.extend_from_slice(run);
            pos += len;
        }
    }

    // A packet may straddle the last pixel.
    out.truncate(expected);
    Ok(out)
}

/// Encode straight RGBA as an uncompressed 32-bit TGA.
///
/// Rows are written in `raw.order`; the origin bit records which one.
pub fn encode(raw: &RawImage) -> Result<Vec<u8>, CodecError> {
    let too_large = || CodecError::TooLarge {
        width: raw.width,
        height: raw.height,
    };
    let width = u16::try_from(raw.width).map_err(|_| too_large())?;
    let height = u16::try_from(raw.height).map_err(|_| too_large())?;

    let mut descriptor = ALPHA_BITS;
    if raw.order == RowOrder::TopDown {
        descriptor |= ORIGIN_TOP;
    }

    let mut out = Vec::with_capacity(HEADER_LEN + raw.data.len());
    out.extend_from_slice(&[0, 0, TYPE_TRUECOLOR, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.push(32);
    out.push(descriptor);

    for px in raw.data.chunks_exact(4) {
        out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
    }
    Ok(out)
}

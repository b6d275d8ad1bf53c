//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use raster_core::RasterImage;

/// Assert two images match, reporting the first differing pixel
pub fn assert_same_image(actual: &RasterImage, expected: &RasterImage) {
    assert_eq!(
        (actual.width(), actual.height()),
        (expected.width(), expected.height()),
        "Image sizes differ"
    );
    let mismatch = actual
        .pixels()
        .zip(expected.pixels())
        .position(|(a, b)| a != b);
    if let Some(i) = mismatch {
        let (x, y) = (i % actual.width(), i / actual.width());
        assert_eq!(
            actual.pixel(x, y),
            expected.pixel(x, y),
            "First differing pixel at ({x}, {y})"
        );
    }
}

/// Assert every color channel is pure black or white
pub fn assert_bilevel(image: &RasterImage) {
    for (i, px) in image.pixels().enumerate() {
        assert!(
            px[..3] == [0, 0, 0] || px[..3] == [255, 255, 255],
            "Pixel {i} is not black or white: {px:?}"
        );
    }
}

/// Assert every pixel is transparent black
pub fn assert_blank(image: &RasterImage) {
    assert!(
        image.as_bytes().iter().all(|&b| b == 0),
        "Expected a blank image"
    );
}

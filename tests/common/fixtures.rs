//! Test images and scratch files.

use std::path::PathBuf;

use raster_core::RasterImage;
use tempfile::TempDir;

/// Opaque 16x12 image with a distinct color per pixel
pub fn gradient() -> RasterImage {
    let (width, height) = (16, 12);
    let mut image = RasterImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            image.set_pixel(x, y, [(x * 16) as u8, (y * 20) as u8, 128, 255]);
        }
    }
    image
}

/// Single-color image
pub fn uniform(width: usize, height: usize, rgba: [u8; 4]) -> RasterImage {
    let data = rgba.iter().copied().cycle().take(width * height * 4).collect();
    RasterImage::from_rgba(width, height, data).unwrap()
}

/// Opaque image whose top half is red and bottom half blue
pub fn red_over_blue(width: usize, height: usize) -> RasterImage {
    let mut image = uniform(width, height, [0, 0, 255, 255]);
    for y in 0..height / 2 {
        for x in 0..width {
            image.set_pixel(x, y, [255, 0, 0, 255]);
        }
    }
    image
}

/// Scratch directory removed when dropped
pub struct Scratch {
    dir: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Save `image` under `name` and return its path
    pub fn write_image(&self, name: &str, image: &RasterImage) -> PathBuf {
        let path = self.path(name);
        rasterlab::codec::save(&path, image).unwrap();
        path
    }

    /// Write a text file under `name` and return its path
    pub fn write_text(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).unwrap();
        path
    }
}

//! Color-depth reduction: grayscale, uniform bucketing and populosity.

mod grayscale;
mod populosity;
mod uniform;

pub use populosity::{
    histogram, select_palette, ColorKey, PaletteMode, PopulosityOptions, DEFAULT_PALETTE_SIZE,
};
pub use uniform::{BLUE_BUCKET, RED_GREEN_BUCKET};

//! Populosity quantization.
//!
//! Builds a histogram of the (optionally pre-bucketed) image colors, keeps
//! the most popular ones as a palette, and maps every pixel to its nearest
//! palette entry in Euclidean RGB distance.

use std::collections::HashMap;

use crate::image::RasterImage;

/// Palette size used when the popular-color reduction is active.
pub const DEFAULT_PALETTE_SIZE: usize = 256;

/// Which histogram entries become the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteMode {
    /// Every distinct color is a palette entry.
    ///
    /// Each pixel then finds itself at distance 0, so apart from the
    /// pre-bucketing this leaves the image unchanged.
    FullHistogram,
    /// Only the `n` most frequent colors (ties broken by color order).
    MostFrequent(usize),
}

/// Configuration for [`RasterImage::quant_populosity`].
///
/// # Defaults
///
/// - Palette: the 256 most frequent colors
/// - Bucket: 1 (no pre-bucketing)
///
/// # Example
///
/// ```
/// use raster_core::{PaletteMode, PopulosityOptions};
///
/// let options = PopulosityOptions::new()
///     .palette(PaletteMode::MostFrequent(16))
///     .bucket(8);
/// assert_eq!(options.bucket, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopulosityOptions {
    /// How the palette is chosen from the histogram.
    pub palette: PaletteMode,
    /// Width of the uniform buckets applied before the histogram is built.
    ///
    /// Each channel becomes `c / bucket * bucket`. A value of 0 is treated
    /// as 1.
    pub bucket: u8,
}

impl Default for PopulosityOptions {
    fn default() -> Self {
        Self {
            palette: PaletteMode::MostFrequent(DEFAULT_PALETTE_SIZE),
            bucket: 1,
        }
    }
}

impl PopulosityOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn palette(mut self, palette: PaletteMode) -> Self {
        self.palette = palette;
        self
    }

    #[inline]
    pub fn bucket(mut self, bucket: u8) -> Self {
        self.bucket = bucket;
        self
    }
}

/// An RGB triple packed as `0x00RRGGBB`.
///
/// Ordering is lexicographic by (r, g, b).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey(u32);

impl ColorKey {
    #[inline]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        ColorKey(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[inline]
    pub fn rgb(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    #[inline]
    fn distance_squared(self, other: ColorKey) -> u32 {
        let a = self.rgb();
        let b = other.rgb();
        a.iter()
            .zip(&b)
            .map(|(&x, &y)| {
                let d = x as i32 - y as i32;
                (d * d) as u32
            })
            .sum()
    }
}

/// Count occurrences of every distinct color.
pub fn histogram(image: &RasterImage) -> HashMap<ColorKey, u32> {
    let mut counts = HashMap::new();
    for px in image.pixels() {
        *counts.entry(ColorKey::new(px[0], px[1], px[2])).or_insert(0) += 1;
    }
    counts
}

/// Order histogram entries by descending count, then ascending color, and
/// keep the palette selected by `mode`.
pub fn select_palette(histogram: &HashMap<ColorKey, u32>, mode: PaletteMode) -> Vec<ColorKey> {
    let mut entries: Vec<(ColorKey, u32)> = histogram.iter().map(|(&k, &c)| (k, c)).collect();
    entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let keep = match mode {
        PaletteMode::FullHistogram => entries.len(),
        PaletteMode::MostFrequent(n) => n.max(1),
    };
    entries.into_iter().take(keep).map(|(k, _)| k).collect()
}

/// Closest palette entry; ties go to the earliest entry.
fn nearest(palette: &[ColorKey], color: ColorKey) -> Option<ColorKey> {
    let mut best: Option<(ColorKey, u32)> = None;
    for &candidate in palette {
        let d = color.distance_squared(candidate);
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((candidate, d));
            if d == 0 {
                break;
            }
        }
    }
    best.map(|(k, _)| k)
}

impl RasterImage {
    /// Populosity quantization. Alpha is kept.
    pub fn quant_populosity(&mut self, options: &PopulosityOptions) {
        let bucket = options.bucket.max(1);
        if bucket > 1 {
            for px in self.as_bytes_mut().chunks_exact_mut(4) {
                for c in &mut px[..3] {
                    *c = *c / bucket * bucket;
                }
            }
        }

        let counts = histogram(self);
        let palette = select_palette(&counts, options.palette);

        // Many pixels share a color; resolve each distinct color once.
        let mut mapping: HashMap<ColorKey, [u8; 3]> = HashMap::with_capacity(counts.len());
        for &color in counts.keys() {
            let target = nearest(&palette, color).unwrap_or(color);
            mapping.insert(color, target.rgb());
        }

        for px in self.as_bytes_mut().chunks_exact_mut(4) {
            if let Some(rgb) = mapping.get(&ColorKey::new(px[0], px[1], px[2])) {
                px[..3].copy_from_slice(rgb);
            }
        }

        tracing::debug!(
            distinct_colors = counts.len(),
            palette_size = palette.len(),
            bucket,
            "Applied populosity quantization"
        );
    }
}

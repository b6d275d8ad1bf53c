//! Dithering options and configuration.

/// Default half-range of the uniform noise added by random dithering.
pub const DEFAULT_NOISE_AMPLITUDE: f32 = 0.2;

/// Configuration options for the dithering operations.
///
/// # Defaults
///
/// - Noise amplitude: 0.2 (random dithering adds noise in `[-0.2, 0.2]`)
/// - Serpentine scanning: enabled (error diffusion alternates row direction)
///
/// # Example
///
/// ```
/// use raster_core::DitherOptions;
///
/// let options = DitherOptions::new()
///     .noise_amplitude(0.1)
///     .serpentine(false);
/// assert!(!options.serpentine);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherOptions {
    /// Half-range of the noise added to normalized luminance before the
    /// 0.5 threshold in random dithering.
    ///
    /// Default: `0.2`
    pub noise_amplitude: f32,

    /// Alternate the scan direction of error diffusion on every row.
    ///
    /// Odd rows run right-to-left with the kernel mirrored, which avoids
    /// directional streaks.
    ///
    /// Default: `true`
    pub serpentine: bool,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
            serpentine: true,
        }
    }
}

impl DitherOptions {
    /// Create new dither options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the random dithering noise half-range.
    #[inline]
    pub fn noise_amplitude(mut self, amplitude: f32) -> Self {
        self.noise_amplitude = amplitude;
        self
    }

    /// Set serpentine scanning mode.
    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.serpentine = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let opts = DitherOptions::default();
        assert!((opts.noise_amplitude - 0.2).abs() < f32::EPSILON);
        assert!(opts.serpentine);
    }

    #[test]
    fn test_builder_chaining() {
        let opts = DitherOptions::new().noise_amplitude(0.05).serpentine(false);
        assert!((opts.noise_amplitude - 0.05).abs() < f32::EPSILON);
        assert!(!opts.serpentine);
    }
}

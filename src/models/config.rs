use std::path::{Path, PathBuf};

use raster_core::dither::DEFAULT_NOISE_AMPLITUDE;
use raster_core::paint::{DEFAULT_ERROR_THRESHOLD, DEFAULT_RADII};
use raster_core::quantize::DEFAULT_PALETTE_SIZE;
use raster_core::{DitherOptions, PaintOptions, PaletteMode, PopulosityOptions};
use serde::Deserialize;

use crate::error::AppError;

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV: &str = "RASTERLAB_CONFIG";

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Fixed RNG seed (entropy when absent)
    pub seed: Option<u64>,

    pub dither: DitherConfig,

    pub populosity: PopulosityConfig,

    pub painterly: PainterlyConfig,
}

/// Tuning for the dither operations
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DitherConfig {
    /// Half-range of the noise added by random dithering
    pub noise_amplitude: f32,

    /// Alternate scan direction in error diffusion
    pub serpentine: bool,
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            noise_amplitude: DEFAULT_NOISE_AMPLITUDE,
            serpentine: true,
        }
    }
}

/// Tuning for populosity quantization
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PopulosityConfig {
    /// Number of popular colors kept; `null` searches the full histogram
    pub palette_size: Option<usize>,

    /// Pre-quantization bucket width (1 = none)
    pub bucket: u8,
}

impl Default for PopulosityConfig {
    fn default() -> Self {
        Self {
            palette_size: Some(DEFAULT_PALETTE_SIZE),
            bucket: 1,
        }
    }
}

/// Tuning for the painterly renderer
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PainterlyConfig {
    pub radii: Vec<u32>,

    pub error_threshold: u32,

    /// Grid spacing as a multiple of the brush radius
    pub grid_factor: f32,
}

impl Default for PainterlyConfig {
    fn default() -> Self {
        Self {
            radii: DEFAULT_RADII.to_vec(),
            error_threshold: DEFAULT_ERROR_THRESHOLD,
            grid_factor: 1.0,
        }
    }
}

impl AppConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self, AppError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a config file
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Resolve the config path: explicit path first, then [`CONFIG_ENV`]
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
    }

    /// Load configuration, falling back to defaults on any failure
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match Self::from_path(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), seed = ?config.seed, "Loaded configuration");
                config
            }
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    pub fn dither_options(&self) -> DitherOptions {
        DitherOptions::new()
            .noise_amplitude(self.dither.noise_amplitude)
            .serpentine(self.dither.serpentine)
    }

    pub fn populosity_options(&self) -> PopulosityOptions {
        let palette = match self.populosity.palette_size {
            Some(n) => PaletteMode::MostFrequent(n),
            None => PaletteMode::FullHistogram,
        };
        PopulosityOptions::new()
            .palette(palette)
            .bucket(self.populosity.bucket)
    }

    pub fn paint_options(&self) -> PaintOptions {
        PaintOptions::new()
            .radii(self.painterly.radii.clone())
            .error_threshold(self.painterly.error_threshold)
            .grid_factor(self.painterly.grid_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.seed, None);
        assert_eq!(config.dither.noise_amplitude, 0.2);
        assert!(config.dither.serpentine);
        assert_eq!(config.populosity.palette_size, Some(256));
        assert_eq!(config.populosity.bucket, 1);
        assert_eq!(config.painterly.radii, vec![7, 3, 1]);
        assert_eq!(config.painterly.error_threshold, 25);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = AppConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let yaml = r#"
seed: 42
painterly:
  radii: [5, 2]
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.painterly.radii, vec![5, 2]);
        assert_eq!(config.painterly.error_threshold, 25);
        assert_eq!(config.populosity, PopulosityConfig::default());
    }

    #[test]
    fn test_null_palette_size_selects_full_histogram() {
        let yaml = r#"
populosity:
  palette_size: null
  bucket: 8
"#;
        let options = AppConfig::from_yaml_str(yaml).unwrap().populosity_options();
        assert_eq!(options.palette, PaletteMode::FullHistogram);
        assert_eq!(options.bucket, 8);
    }

    #[test]
    fn test_options_mapping() {
        let yaml = r#"
dither:
  noise_amplitude: 0.5
  serpentine: false
painterly:
  error_threshold: 10
  grid_factor: 2.0
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        let dither = config.dither_options();
        assert_eq!(dither.noise_amplitude, 0.5);
        assert!(!dither.serpentine);

        let paint = config.paint_options();
        assert_eq!(paint.radii, vec![7, 3, 1]);
        assert_eq!(paint.error_threshold, 10);
        assert_eq!(paint.grid_factor, 2.0);
        assert_eq!(
            config.populosity_options().palette,
            PaletteMode::MostFrequent(256)
        );
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(matches!(
            AppConfig::from_yaml_str("seed: [not, a, number]"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/rasterlab.yaml")));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_resolve_path_prefers_explicit() {
        let explicit = PathBuf::from("given.yaml");
        assert_eq!(
            AppConfig::resolve_path(Some(explicit.clone())),
            Some(explicit)
        );
    }
}

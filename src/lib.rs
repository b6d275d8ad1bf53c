//! Rasterlab - RGBA image processing from the command line
//!
//! Wraps the `raster_core` operations with file codecs, YAML configuration
//! and a processor service. This library exposes modules for integration
//! testing.

pub mod codec;
pub mod error;
pub mod models;
pub mod services;

pub mod config;

pub use config::{AppConfig, DitherConfig, PainterlyConfig, PopulosityConfig, CONFIG_ENV};

//! Painterly rendering with circular brush strokes.
//!
//! A simplified multi-pass stroke renderer: each pass blurs the source to a
//! reference layer, finds grid cells where the canvas still differs from
//! that reference, and paints a round stroke of the reference color at the
//! worst pixel of each such cell. Passes run from the largest brush to the
//! smallest so fine strokes refine coarse ones.

mod renderer;
mod stroke;

pub use renderer::{PaintOptions, DEFAULT_ERROR_THRESHOLD, DEFAULT_RADII};
pub use stroke::Stroke;

//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers of the visualizer are collected here with:
//! - Units (Hz, pixels, 0-255 byte scales)
//! - Documented ranges and meanings
//! - A `validate()` guard before use

mod audio;
mod render;
mod spiral;

// Re-export all types
pub use audio::{AnalyzerConfig, InputSource};
pub use render::RenderConfig;
pub use spiral::SpiralParams;

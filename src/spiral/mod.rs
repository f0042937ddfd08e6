//! Pitch-scaled spiral: bin-to-point mapping and per-frame segment building.
//!
//! One loop of the spiral spans one octave, so every note lines up with its
//! octaves along a ray from the origin.

mod color;
mod frame;
mod geometry;
mod state;

// Re-export public types
pub use color::{hsb_to_rgb, spiral_hue};
pub use frame::{build_frame, Segment};
pub use geometry::{to_cartesian, to_polar, translate, CartesianPoint, PolarPoint};
pub use state::{BinRange, SpiralPoint, SpiralState, Viewport};

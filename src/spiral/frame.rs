//! Per-frame segment building from a spectrum frame.

use super::color::hsb_to_rgb;
use super::geometry::{to_cartesian, translate, CartesianPoint};
use super::state::SpiralState;

/// One stroked piece of the spiral, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: CartesianPoint,
    pub to: CartesianPoint,
    /// Linear RGB in [0, 1]
    pub color: [f32; 3],
}

impl Segment {
    pub fn is_dot(&self) -> bool {
        self.from == self.to
    }
}

/// Map every bin of the spiral's range onto a stroked segment.
///
/// The first segment of each frame starts and ends on the same point, so
/// nothing trails from the previous frame. Bins past the end of `spectrum`
/// are not drawn.
pub fn build_frame(state: &SpiralState, spectrum: &[u8]) -> Vec<Segment> {
    let bins = state.bins();
    if spectrum.len() != state.bin_count() {
        log::trace!(
            "Spectrum has {} bins, expected {}",
            spectrum.len(),
            state.bin_count()
        );
    }

    let origin = state.viewport().origin;
    let mut segments = Vec::with_capacity(bins.max_bin + 1 - bins.min_bin);
    let mut last_point: Option<CartesianPoint> = None;

    for bin in bins.iter() {
        let Some(&magnitude) = spectrum.get(bin) else {
            break;
        };
        let Some(point) = state.bin_point(bin, magnitude) else {
            continue;
        };

        let new_point = translate(to_cartesian(point.polar), origin);
        let from = last_point.unwrap_or(new_point);
        let color = hsb_to_rgb(state.hue(point.position), 255.0, 255.0);

        segments.push(Segment {
            from,
            to: new_point,
            color,
        });
        last_point = Some(new_point);
    }

    segments
}

//! Renderer state: derived spiral constants, bin range and viewport geometry.

use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use super::color::spiral_hue;
use super::geometry::{CartesianPoint, PolarPoint};
use crate::error::ConfigError;
use crate::params::{AnalyzerConfig, SpiralParams};

/// Inclusive range of spectrum bins mapped onto the spiral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinRange {
    pub min_bin: usize,
    pub max_bin: usize,
}

impl BinRange {
    /// Bins nearest to `min_freq_hz` and `max_freq_hz`, clamped to `bin_count`
    pub fn new(min_freq_hz: f32, max_freq_hz: f32, hz_per_bin: f32, bin_count: usize) -> Self {
        let last = bin_count.saturating_sub(1);
        let max_bin = ((max_freq_hz / hz_per_bin).round() as usize).min(last);
        let min_bin = ((min_freq_hz / hz_per_bin).round() as usize).min(max_bin);
        Self { min_bin, max_bin }
    }

    pub fn iter(&self) -> RangeInclusive<usize> {
        self.min_bin..=self.max_bin
    }
}

/// Canvas-dependent geometry, recomputed on resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,

    /// Radius of the innermost point (pixels)
    pub min_r: f32,

    /// Radius of the outermost point before wiggle (pixels)
    pub max_r: f32,

    /// Spiral center on the canvas
    pub origin: CartesianPoint,
}

impl Viewport {
    pub fn new(width: u32, height: u32, nudge: (f32, f32)) -> Self {
        let width = width as f32;
        let height = height as f32;
        let margin = height / 25.0;
        Self {
            width,
            height,
            min_r: height / 60.0,
            max_r: height / 2.0 - margin,
            origin: CartesianPoint::new(width / 2.0 + nudge.0, height / 2.0 + nudge.1),
        }
    }
}

/// One bin placed on the spiral
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpiralPoint {
    pub polar: PolarPoint,

    /// Normalized position along the spiral (0 = inside, 1 = outside)
    pub position: f32,
}

/// Everything the frame builder reads: constructed at startup, updated on
/// resize and when the real sample rate becomes known.
#[derive(Debug, Clone)]
pub struct SpiralState {
    params: SpiralParams,
    min_pitch: f32,
    max_pitch: f32,
    pitch_at_zero_theta: f32,
    bin_count: usize,
    hz_per_bin: f32,
    bins: BinRange,
    viewport: Viewport,
}

impl SpiralState {
    pub fn new(
        params: SpiralParams,
        analyzer: &AnalyzerConfig,
        sample_rate_hz: u32,
        width: u32,
        height: u32,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        analyzer.validate()?;
        if sample_rate_hz == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }

        let hz_per_bin = analyzer.hz_per_bin(sample_rate_hz);
        let bins = BinRange::new(
            params.min_freq_hz,
            params.max_freq_hz(),
            hz_per_bin,
            analyzer.fft_size,
        );
        let viewport = Viewport::new(width, height, params.nudge);

        log::info!(
            "Spiral: {:.1}-{:.1} Hz over {} octaves, bins {}..={} ({:.2} Hz/bin)",
            params.min_freq_hz,
            params.max_freq_hz(),
            params.num_octaves,
            bins.min_bin,
            bins.max_bin,
            hz_per_bin
        );

        Ok(Self {
            min_pitch: params.min_pitch(),
            max_pitch: params.max_pitch(),
            pitch_at_zero_theta: params.pitch_at_zero_theta(),
            bin_count: analyzer.fft_size,
            hz_per_bin,
            bins,
            viewport,
            params,
        })
    }

    /// Recompute canvas geometry; the frequency-to-angle mapping is unchanged
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height, self.params.nudge);
        log::debug!(
            "Spiral resized to {}x{} (radius {:.1}-{:.1})",
            width,
            height,
            self.viewport.min_r,
            self.viewport.max_r
        );
    }

    pub fn params(&self) -> &SpiralParams {
        &self.params
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn bins(&self) -> BinRange {
        self.bins
    }

    /// Number of bins a spectrum frame is expected to hold
    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    pub fn bin_frequency(&self, bin: usize) -> f32 {
        bin as f32 * self.hz_per_bin
    }

    /// Normalized spiral position of a pitch
    pub fn position(&self, pitch: f32) -> f32 {
        (pitch - self.min_pitch) / (self.max_pitch - self.min_pitch)
    }

    /// Angle of a pitch: one full turn per octave, zero at the reference pitch
    pub fn theta(&self, pitch: f32) -> f32 {
        TAU * (pitch - self.pitch_at_zero_theta)
    }

    /// Radial distance between adjacent windings ("a" in r = a * theta)
    pub fn winding_gap(&self) -> f32 {
        (self.viewport.max_r - self.viewport.min_r) / self.params.num_octaves as f32
    }

    /// Unperturbed spiral radius at a pitch
    pub fn base_radius(&self, pitch: f32) -> f32 {
        self.winding_gap() * (pitch - self.min_pitch) + self.viewport.min_r
    }

    /// Outward bulge for a bin magnitude
    pub fn wiggle(&self, magnitude: u8) -> f32 {
        (magnitude as f32 / 255.0) * self.params.wiggle_amplitude * self.winding_gap()
    }

    pub fn hue(&self, position: f32) -> f32 {
        spiral_hue(self.params.color_offset, position)
    }

    /// Place a bin on the spiral; `None` for the DC bin, which has no pitch
    pub fn bin_point(&self, bin: usize, magnitude: u8) -> Option<SpiralPoint> {
        let freq = self.bin_frequency(bin);
        if freq <= 0.0 {
            return None;
        }

        let pitch = freq.log2();
        let r = self.base_radius(pitch) + self.wiggle(magnitude);
        Some(SpiralPoint {
            polar: PolarPoint::new(r, self.theta(pitch)),
            position: self.position(pitch),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn state() -> SpiralState {
        SpiralState::new(
            SpiralParams::default(),
            &AnalyzerConfig::default(),
            44100,
            1200,
            900,
        )
        .unwrap()
    }

    #[test]
    fn test_bin_range_at_44100() {
        let state = state();
        // 110 / 5.3833 = 20.43, 3520 / 5.3833 = 653.9
        assert_eq!(state.bins(), BinRange { min_bin: 20, max_bin: 654 });
    }

    #[test]
    fn test_bin_range_clamped_to_bin_count() {
        let params = SpiralParams {
            num_octaves: 12,
            ..Default::default()
        };
        let state =
            SpiralState::new(params, &AnalyzerConfig::default(), 44100, 800, 600).unwrap();
        assert_eq!(state.bins().max_bin, 4095);
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let result = SpiralState::new(
            SpiralParams::default(),
            &AnalyzerConfig::default(),
            0,
            800,
            600,
        );
        assert!(matches!(result, Err(ConfigError::ZeroSampleRate)));
    }

    #[test]
    fn test_viewport_geometry() {
        let viewport = state().viewport;
        assert_relative_eq!(viewport.min_r, 15.0);
        assert_relative_eq!(viewport.max_r, 450.0 - 36.0);
        assert_eq!(viewport.origin, CartesianPoint::new(520.0, 435.0));
    }

    #[test]
    fn test_position_endpoints() {
        let state = state();
        let params = state.params().clone();
        assert_relative_eq!(state.position(params.min_pitch()), 0.0);
        assert_relative_eq!(state.position(params.max_pitch()), 1.0);
    }

    #[test]
    fn test_reference_frequency_at_zero_angle() {
        let state = state();
        assert_relative_eq!(state.theta(110f32.log2()), 0.0);
        // One octave up is one full turn
        assert_relative_eq!(state.theta(220f32.log2()), TAU, epsilon = 1e-5);
    }

    #[test]
    fn test_base_radius_matches_linear_interpolation() {
        let state = state();
        let viewport = *state.viewport();
        for freq in [110.0f32, 261.6, 1000.0, 3520.0] {
            let pitch = freq.log2();
            let t = state.position(pitch);
            let lerp = viewport.min_r + (viewport.max_r - viewport.min_r) * t;
            assert_relative_eq!(state.base_radius(pitch), lerp, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_wiggle() {
        let state = state();
        assert_eq!(state.wiggle(0), 0.0);
        assert_relative_eq!(state.wiggle(255), 1.5 * state.winding_gap());
    }

    #[test]
    fn test_dc_bin_has_no_point() {
        assert!(state().bin_point(0, 255).is_none());
    }

    #[test]
    fn test_resize_rescales_radii_only() {
        let mut state = state();
        let before = *state.viewport();
        let theta_before = state.theta(440f32.log2());

        state.resize(600, 450);
        let after = *state.viewport();

        assert_relative_eq!(after.min_r, before.min_r / 2.0);
        assert_relative_eq!(after.max_r, before.max_r / 2.0);
        assert_relative_eq!(state.theta(440f32.log2()), theta_before);
        assert_eq!(state.bins(), BinRange { min_bin: 20, max_bin: 654 });
    }
}

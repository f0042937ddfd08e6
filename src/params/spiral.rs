//! Spiral shape and color parameters.

use crate::error::ConfigError;

/// Look of the spiral, fixed at startup
#[derive(Debug, Clone)]
pub struct SpiralParams {
    /// Number of octaves, i.e. loops of the spiral
    pub num_octaves: u32,

    /// Lowest displayed frequency (Hz), sits on the innermost point
    pub min_freq_hz: f32,

    /// Frequency lined up at theta = 0 (3 o'clock)
    pub freq_at_zero_theta_hz: f32,

    /// Multiplier for the spectrum signal bulging the spiral outward
    pub wiggle_amplitude: f32,

    /// Width of the stroked segments (pixels)
    pub stroke_weight: f32,

    /// Hue at the inside of the spiral (0-255 hue scale)
    pub color_offset: u8,

    /// Offset of the spiral origin from the canvas center (pixels)
    pub nudge: (f32, f32),
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            num_octaves: 5,
            min_freq_hz: 110.0,
            freq_at_zero_theta_hz: 110.0,
            wiggle_amplitude: 1.5,
            stroke_weight: 4.0,
            color_offset: 236,
            nudge: (-80.0, -15.0),
        }
    }
}

impl SpiralParams {
    /// Highest displayed frequency: one doubling per octave above `min_freq_hz`
    pub fn max_freq_hz(&self) -> f32 {
        self.min_freq_hz * 2f32.powi(self.num_octaves as i32)
    }

    /// Pitch (log2 of frequency) of the innermost point
    pub fn min_pitch(&self) -> f32 {
        self.min_freq_hz.log2()
    }

    /// Pitch of the outermost point
    pub fn max_pitch(&self) -> f32 {
        self.max_freq_hz().log2()
    }

    /// Pitch drawn at angle zero
    pub fn pitch_at_zero_theta(&self) -> f32 {
        self.freq_at_zero_theta_hz.log2()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_octaves == 0 {
            return Err(ConfigError::NoOctaves(self.num_octaves));
        }
        if !(self.min_freq_hz > 0.0) {
            return Err(ConfigError::NonPositiveFrequency {
                name: "minimum frequency",
                value: self.min_freq_hz,
            });
        }
        if !(self.freq_at_zero_theta_hz > 0.0) {
            return Err(ConfigError::NonPositiveFrequency {
                name: "frequency at zero theta",
                value: self.freq_at_zero_theta_hz,
            });
        }
        if !(self.stroke_weight > 0.0) {
            return Err(ConfigError::NonPositiveStrokeWeight(self.stroke_weight));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_freq_is_min_freq_doubled_per_octave() {
        let params = SpiralParams::default();
        assert_eq!(params.max_freq_hz(), 3520.0);
        assert!((params.max_pitch() - params.min_pitch() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_validate_rejects_zero_octaves() {
        let params = SpiralParams {
            num_octaves: 0,
            ..Default::default()
        };
        assert_eq!(params.validate(), Err(ConfigError::NoOctaves(0)));
    }

    #[test]
    fn test_validate_rejects_non_positive_frequencies() {
        let params = SpiralParams {
            min_freq_hz: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NonPositiveFrequency { .. })
        ));

        let params = SpiralParams {
            freq_at_zero_theta_hz: -55.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(SpiralParams::default().validate().is_ok());
    }
}

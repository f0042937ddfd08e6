//! Audio input and spectrum analysis configuration.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Where samples come from
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputSource {
    /// Default input device of the default host
    #[default]
    Microphone,

    /// PCM WAV file, streamed in real time and looped
    WavFile(PathBuf),
}

/// Spectrum analysis configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Number of usable bins returned per analysis.
    /// The FFT window is twice this (bins above Nyquist are discarded).
    pub fft_size: usize,

    /// Exponential smoothing across frames, in [0, 1)
    pub smoothing: f32,

    /// Magnitude mapped to byte 0 (dB)
    pub min_db: f32,

    /// Magnitude mapped to byte 255 (dB)
    pub max_db: f32,

    /// Sample source
    pub input: InputSource,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 4096,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
            input: InputSource::Microphone,
        }
    }
}

impl AnalyzerConfig {
    /// Samples per FFT window
    pub fn window_size(&self) -> usize {
        self.fft_size * 2
    }

    /// Frequency width of one bin at the given sample rate
    pub fn hz_per_bin(&self, sample_rate_hz: u32) -> f32 {
        sample_rate_hz as f32 / self.window_size() as f32
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size.is_power_of_two() {
            return Err(ConfigError::FftSizeNotPowerOfTwo(self.fft_size));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(ConfigError::SmoothingOutOfRange(self.smoothing));
        }
        if self.min_db >= self.max_db {
            return Err(ConfigError::EmptyDecibelRange {
                min: self.min_db,
                max: self.max_db,
            });
        }
        Ok(())
    }
}

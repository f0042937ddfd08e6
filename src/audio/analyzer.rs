//! Byte spectrum analysis: Blackman window, FFT, smoothing, dB scaling.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::params::AnalyzerConfig;

/// Stateful analyzer turning a window of samples into `fft_size` magnitude bytes.
///
/// Smoothing carries state from one call to the next.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
    bytes: Vec<u8>,
    smoothing: f32,
    min_db: f32,
    max_db: f32,
}

impl SpectrumAnalyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        let size = config.window_size();
        let mut planner = FftPlanner::new();
        Self {
            fft: planner.plan_fft_forward(size),
            window: (0..size).map(|i| blackman_window(i, size)).collect(),
            scratch: vec![Complex::new(0.0, 0.0); size],
            smoothed: vec![0.0; config.fft_size],
            bytes: vec![0; config.fft_size],
            smoothing: config.smoothing,
            min_db: config.min_db,
            max_db: config.max_db,
        }
    }

    /// Samples consumed per analysis
    pub fn window_size(&self) -> usize {
        self.window.len()
    }

    /// Analyze the most recent `window_size()` samples (oldest first).
    ///
    /// Shorter input is treated as preceded by silence.
    pub fn process(&mut self, samples: &[f32]) -> &[u8] {
        let size = self.window_size();
        let pad = size.saturating_sub(samples.len());
        let recent = &samples[samples.len().saturating_sub(size)..];

        for (i, slot) in self.scratch.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.scratch);

        let scale = 1.0 / size as f32;
        let range = self.max_db - self.min_db;
        for (k, byte) in self.bytes.iter_mut().enumerate() {
            let magnitude = self.scratch[k].norm() * scale;
            let smoothed =
                self.smoothing * self.smoothed[k] + (1.0 - self.smoothing) * magnitude;
            self.smoothed[k] = if smoothed.is_finite() { smoothed } else { 0.0 };

            let db = 20.0 * self.smoothed[k].log10();
            *byte = (255.0 / range * (db - self.min_db)).clamp(0.0, 255.0) as u8;
        }

        &self.bytes
    }

    /// Drop smoothing history
    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
        self.bytes.fill(0);
    }
}

/// Blackman window coefficient (a0 = 0.42, a1 = 0.5, a2 = 0.08)
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let x = index as f32 / size as f32;
    0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AnalyzerConfig {
        AnalyzerConfig {
            fft_size: 512,
            smoothing: 0.0,
            ..Default::default()
        }
    }

    // Quiet enough that the main lobe stays under the 255 ceiling
    const AMPLITUDE: f32 = 1e-3;

    fn sine(freq_hz: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|n| AMPLITUDE * (2.0 * PI * freq_hz * n as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_blackman_window() {
        let size = 1024;

        // Blackman window is ~0 at the edge and 1 at the center
        assert!(blackman_window(0, size).abs() < 1e-6);
        assert!((blackman_window(size / 2, size) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_silence_is_all_zero() {
        let mut analyzer = SpectrumAnalyzer::new(&config());
        let bytes = analyzer.process(&vec![0.0; 1024]);
        assert_eq!(bytes.len(), 512);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_sine_peaks_at_its_bin() {
        let config = config();
        let sample_rate = 48000.0;
        let hz_per_bin = sample_rate / config.window_size() as f32;
        let target_bin = 40;

        let mut analyzer = SpectrumAnalyzer::new(&config);
        let samples = sine(target_bin as f32 * hz_per_bin, sample_rate, 1024);
        let bytes = analyzer.process(&samples);

        let (peak_bin, &peak) = bytes
            .iter()
            .enumerate()
            .max_by_key(|&(_, &b)| b)
            .unwrap();
        assert_eq!(peak_bin, target_bin);
        assert!(peak > 50);
        // Far away bins fall under the dB floor
        assert_eq!(bytes[400], 0);
    }

    #[test]
    fn test_short_input_is_zero_padded() {
        let mut analyzer = SpectrumAnalyzer::new(&config());
        let bytes = analyzer.process(&[0.0; 10]).to_vec();
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_smoothing_decays_gradually() {
        let config = AnalyzerConfig {
            smoothing: 0.8,
            ..config()
        };
        let mut analyzer = SpectrumAnalyzer::new(&config);
        let loud = sine(40.0 * 48000.0 / 1024.0, 48000.0, 1024);

        for _ in 0..20 {
            analyzer.process(&loud);
        }
        let settled = analyzer.process(&loud)[40];

        let after_one_silent = analyzer.process(&vec![0.0; 1024])[40];
        assert!(after_one_silent < settled);
        assert!(after_one_silent > 0);

        analyzer.reset();
        assert_eq!(analyzer.process(&vec![0.0; 1024])[40], 0);
    }
}

//! Spectrum source: owns the input, the sample ring and the analyzer.

use std::sync::{Arc, Mutex};

use super::analyzer::SpectrumAnalyzer;
use super::buffer::SampleBuffer;
use super::capture::AudioCapture;
use crate::error::AudioError;
use crate::params::{AnalyzerConfig, InputSource};

/// Produces one byte spectrum per render tick once capture has started
pub struct SpectrumSource {
    config: AnalyzerConfig,
    samples: Arc<Mutex<SampleBuffer>>,
    analyzer: SpectrumAnalyzer,
    window: Vec<f32>,
    capture: Option<AudioCapture>,
}

impl SpectrumSource {
    /// Create an idle source; nothing is captured until [`start`](Self::start)
    pub fn new(config: AnalyzerConfig) -> Result<Self, AudioError> {
        config.validate()?;

        let window_size = config.window_size();
        Ok(Self {
            samples: Arc::new(Mutex::new(SampleBuffer::new(window_size))),
            analyzer: SpectrumAnalyzer::new(&config),
            window: Vec::with_capacity(window_size),
            capture: None,
            config,
        })
    }

    /// Begin capturing from the configured input; returns the input's sample rate.
    ///
    /// Calling this while already capturing is a no-op.
    pub fn start(&mut self) -> Result<u32, AudioError> {
        if let Some(capture) = &self.capture {
            return Ok(capture.sample_rate_hz());
        }

        let buffer = Arc::clone(&self.samples);
        let capture = match &self.config.input {
            InputSource::Microphone => AudioCapture::microphone(buffer)?,
            InputSource::WavFile(path) => AudioCapture::wav_file(path, buffer)?,
        };
        let sample_rate_hz = capture.sample_rate_hz();
        self.capture = Some(capture);
        Ok(sample_rate_hz)
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    pub fn sample_rate_hz(&self) -> Option<u32> {
        self.capture.as_ref().map(AudioCapture::sample_rate_hz)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Current spectrum, `fft_size` bytes long; `None` until capture has started
    pub fn analyze(&mut self) -> Option<&[u8]> {
        self.capture.as_ref()?;

        match self.samples.lock() {
            Ok(buffer) => buffer.copy_ordered(&mut self.window),
            Err(_) => {
                log::warn!("Sample buffer poisoned, skipping analysis");
                return None;
            }
        }
        Some(self.analyzer.process(&self.window))
    }
}

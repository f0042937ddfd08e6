//! Error types shared across the audio, spiral and rendering systems.

use thiserror::Error;

/// Invalid configuration detected by a `validate()` call
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("number of octaves must be at least 1, got {0}")]
    NoOctaves(u32),

    #[error("{name} must be a positive frequency, got {value} Hz")]
    NonPositiveFrequency { name: &'static str, value: f32 },

    #[error("FFT size must be a power of 2, got {0}")]
    FftSizeNotPowerOfTwo(usize),

    #[error("smoothing must be in [0, 1), got {0}")]
    SmoothingOutOfRange(f32),

    #[error("decibel range is empty: min {min} dB >= max {max} dB")]
    EmptyDecibelRange { min: f32, max: f32 },

    #[error("stroke weight must be positive, got {0}")]
    NonPositiveStrokeWeight(f32),

    #[error("sample rate must be > 0")]
    ZeroSampleRate,
}

/// Failures while opening or running an audio input
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio input device found")]
    NoInputDevice,

    #[error("failed to query input config: {0}")]
    InputConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("unsupported sample format {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),

    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("failed to read WAV file: {0}")]
    Wav(#[from] hound::Error),

    #[error("WAV file contains no samples")]
    EmptyWav,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Failures while setting up or driving the GPU canvas
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("failed to save screenshot: {0}")]
    Screenshot(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

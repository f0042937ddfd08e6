//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::params::{AnalyzerConfig, InputSource, RenderConfig, SpiralParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Spiralscope")]
#[command(about = "Live audio spectrum drawn as a pitch spiral", long_about = None)]
pub struct Args {
    /// Visualize a WAV file (looped in real time) instead of the default input device
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Start capturing immediately instead of waiting for the first click
    #[arg(long)]
    pub autostart: bool,

    /// Number of octaves (loops of the spiral)
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub octaves: u32,

    /// Lowest displayed frequency
    #[arg(long, value_name = "HZ", default_value_t = 110.0)]
    pub min_freq: f32,

    /// Frequency lined up at 3 o'clock
    #[arg(long, value_name = "HZ", default_value_t = 110.0)]
    pub zero_theta_freq: f32,

    /// Usable FFT bins (the analysis window is twice this, power of 2)
    #[arg(long, value_name = "BINS", default_value_t = 4096)]
    pub fft_size: usize,

    /// Spectrum smoothing across frames, in [0, 1)
    #[arg(long, value_name = "FACTOR", default_value_t = 0.8)]
    pub smoothing: f32,

    /// Opacity (0-255) of the per-frame black overlay; lower leaves longer trails
    #[arg(long, value_name = "ALPHA", default_value_t = 30)]
    pub damping: u8,

    /// Multiplier for the spectrum bulge
    #[arg(long, value_name = "FACTOR", default_value_t = 1.5)]
    pub wiggle: f32,

    /// Line width
    #[arg(long, value_name = "PIXELS", default_value_t = 4.0)]
    pub stroke_weight: f32,

    /// Hue (0-255) at the inside of the spiral
    #[arg(long, value_name = "HUE", default_value_t = 236)]
    pub color_offset: u8,

    /// Horizontal offset of the spiral center
    #[arg(long, value_name = "PIXELS", default_value_t = -80.0, allow_hyphen_values = true)]
    pub nudge_x: f32,

    /// Vertical offset of the spiral center
    #[arg(long, value_name = "PIXELS", default_value_t = -15.0, allow_hyphen_values = true)]
    pub nudge_y: f32,

    /// Initial window width
    #[arg(long, value_name = "PIXELS", default_value_t = 1280)]
    pub width: u32,

    /// Initial window height
    #[arg(long, value_name = "PIXELS", default_value_t = 720)]
    pub height: u32,

    /// Directory for screenshots (press S)
    #[arg(long, value_name = "DIR", default_value = "screenshots")]
    pub screenshot_dir: String,
}

impl Args {
    pub fn spiral_params(&self) -> SpiralParams {
        SpiralParams {
            num_octaves: self.octaves,
            min_freq_hz: self.min_freq,
            freq_at_zero_theta_hz: self.zero_theta_freq,
            wiggle_amplitude: self.wiggle,
            stroke_weight: self.stroke_weight,
            color_offset: self.color_offset,
            nudge: (self.nudge_x, self.nudge_y),
        }
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        let input = match &self.input {
            Some(path) => InputSource::WavFile(path.clone()),
            None => InputSource::Microphone,
        };
        AnalyzerConfig {
            fft_size: self.fft_size,
            smoothing: self.smoothing,
            input,
            ..Default::default()
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            damping: self.damping,
            screenshot_dir: self.screenshot_dir.clone(),
        }
    }
}

//! Audio capture and spectrum analysis.
//!
//! An input (default device or WAV file) fills a ring of the latest samples;
//! the render loop asks for a byte spectrum of that window once per frame.

mod analyzer;
mod buffer;
mod capture;
mod source;

// Re-export public types
pub use analyzer::{blackman_window, SpectrumAnalyzer};
pub use buffer::SampleBuffer;
pub use capture::{read_wav_mono, AudioCapture};
pub use source::SpectrumSource;

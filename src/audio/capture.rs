//! Audio inputs feeding the shared sample buffer: default input device or a WAV file.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use super::buffer::SampleBuffer;
use crate::error::AudioError;

/// How often the WAV feeder tops up the buffer
const FEED_INTERVAL: Duration = Duration::from_millis(10);

/// A running audio input. Capture stops when this is dropped.
pub struct AudioCapture {
    sample_rate_hz: u32,
    _handle: CaptureHandle,
}

enum CaptureHandle {
    /// Input stream (kept alive)
    Stream(cpal::Stream),
    Feeder(WavFeeder),
}

impl AudioCapture {
    /// Start capturing from the default input device of the default host
    pub fn microphone(buffer: Arc<Mutex<SampleBuffer>>) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(AudioError::NoInputDevice)?;

        let supported = device.default_input_config()?;
        let sample_format = supported.sample_format();
        let config: cpal::StreamConfig = supported.config();

        log::info!(
            "Audio input: {} @ {}Hz, {} channel(s), {:?}",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            config.sample_rate.0,
            config.channels,
            sample_format
        );

        let stream = match sample_format {
            SampleFormat::F32 => build_input_stream::<f32>(&device, &config, buffer)?,
            SampleFormat::I16 => build_input_stream::<i16>(&device, &config, buffer)?,
            SampleFormat::U16 => build_input_stream::<u16>(&device, &config, buffer)?,
            SampleFormat::I32 => build_input_stream::<i32>(&device, &config, buffer)?,
            other => return Err(AudioError::UnsupportedFormat(other)),
        };
        stream.play()?;

        Ok(Self {
            sample_rate_hz: config.sample_rate.0,
            _handle: CaptureHandle::Stream(stream),
        })
    }

    /// Stream a WAV file into the buffer in real time, looping at the end
    pub fn wav_file(path: &Path, buffer: Arc<Mutex<SampleBuffer>>) -> Result<Self, AudioError> {
        let (samples, sample_rate_hz) = read_wav_mono(path)?;
        log::info!(
            "Audio input: {} @ {}Hz, {:.1}s",
            path.display(),
            sample_rate_hz,
            samples.len() as f32 / sample_rate_hz as f32
        );

        let feeder = WavFeeder::spawn(samples, sample_rate_hz, buffer);
        Ok(Self {
            sample_rate_hz,
            _handle: CaptureHandle::Feeder(feeder),
        })
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }
}

fn build_input_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    buffer: Arc<Mutex<SampleBuffer>>,
) -> Result<cpal::Stream, cpal::BuildStreamError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = config.channels as usize;
    let mut mono = Vec::new();

    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            mono.clear();
            mono.extend(data.iter().map(|&s| f32::from_sample(s)));
            if let Ok(mut buf) = buffer.lock() {
                buf.extend_interleaved(&mono, channels);
            }
        },
        |err| log::error!("Audio stream error: {}", err),
        None,
    )
}

/// Decode a WAV file into mono `f32` samples in [-1, 1]
pub fn read_wav_mono(path: &Path) -> Result<(Vec<f32>, u32), AudioError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / full_scale))
                .collect::<Result<_, _>>()?
        }
    };

    let channels = spec.channels.max(1) as usize;
    let mono: Vec<f32> = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();

    if mono.is_empty() {
        return Err(AudioError::EmptyWav);
    }
    Ok((mono, spec.sample_rate))
}

/// Background thread pacing decoded samples into the buffer at the file's rate
struct WavFeeder {
    stop: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl WavFeeder {
    fn spawn(samples: Vec<f32>, sample_rate_hz: u32, buffer: Arc<Mutex<SampleBuffer>>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let thread = thread::spawn(move || {
            let start = Instant::now();
            let mut fed: u64 = 0;

            while !stop_flag.load(Ordering::Relaxed) {
                thread::sleep(FEED_INTERVAL);

                let due = (start.elapsed().as_secs_f64() * sample_rate_hz as f64) as u64;
                let Ok(mut buf) = buffer.lock() else {
                    break;
                };
                while fed < due {
                    buf.push(samples[(fed % samples.len() as u64) as usize]);
                    fed += 1;
                }
            }
        });

        Self {
            stop,
            thread: Some(thread),
        }
    }
}

impl Drop for WavFeeder {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_wav(path: &Path, spec: hound::WavSpec, frames: &[[i16; 2]]) {
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for frame in frames {
            for &s in frame {
                writer.write_sample(s).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("spiralscope_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_read_wav_mono_mixes_down_and_normalizes() {
        let path = temp_path("stereo.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        write_wav(&path, spec, &[[16384, 16384], [-32768, 0]]);

        let (mono, rate) = read_wav_mono(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(rate, 22050);
        assert_eq!(mono, vec![0.5, -0.5]);
    }

    #[test]
    fn test_read_wav_mono_rejects_empty_file() {
        let path = temp_path("empty.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        hound::WavWriter::create(&path, spec)
            .unwrap()
            .finalize()
            .unwrap();

        let result = read_wav_mono(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(AudioError::EmptyWav)));
    }

    #[test]
    fn test_missing_wav_is_an_error() {
        let result = read_wav_mono(Path::new("/nonexistent/spiralscope.wav"));
        assert!(matches!(result, Err(AudioError::Wav(_))));
    }

    #[test]
    fn test_wav_capture_feeds_buffer() {
        let path = temp_path("feed.wav");
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        write_wav(&path, spec, &[[16384, 16384]; 800]);

        let buffer = Arc::new(Mutex::new(SampleBuffer::new(64)));
        let capture = AudioCapture::wav_file(&path, Arc::clone(&buffer)).unwrap();
        assert_eq!(capture.sample_rate_hz(), 8000);

        thread::sleep(Duration::from_millis(100));
        drop(capture);
        std::fs::remove_file(&path).ok();

        let mut out = Vec::new();
        buffer.lock().unwrap().copy_ordered(&mut out);
        assert!(out.iter().all(|&s| s == 0.5));
    }
}

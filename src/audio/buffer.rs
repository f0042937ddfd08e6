//! Ring of the most recent mono samples, shared between capture and analysis.

/// Fixed-size ring holding the latest `capacity` samples.
///
/// Starts out filled with silence so a full window is always available.
pub struct SampleBuffer {
    samples: Vec<f32>,
    write_pos: usize,
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0.0; capacity.max(1)],
            write_pos: 0,
        }
    }

    pub fn push(&mut self, sample: f32) {
        self.samples[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.samples.len();
    }

    pub fn extend(&mut self, samples: &[f32]) {
        for &sample in samples {
            self.push(sample);
        }
    }

    /// Push interleaved frames, averaging channels down to mono
    pub fn extend_interleaved(&mut self, data: &[f32], channels: usize) {
        for frame in data.chunks(channels.max(1)) {
            self.push(frame.iter().sum::<f32>() / frame.len() as f32);
        }
    }

    /// Copy the contents into `out`, oldest sample first
    pub fn copy_ordered(&self, out: &mut Vec<f32>) {
        out.clear();
        out.extend_from_slice(&self.samples[self.write_pos..]);
        out.extend_from_slice(&self.samples[..self.write_pos]);
    }
}

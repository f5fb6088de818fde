use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Sample counter shared between the audio thread (which advances it) and
/// the control side (which reads it as "current audio time").
///
/// This is the audio clock: it runs at the device's pace, independent of the
/// video frame rate.
#[derive(Debug, Clone)]
pub struct SampleClock {
    samples: Arc<AtomicU64>,
    sample_rate: f32,
}

impl SampleClock {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            samples: Arc::new(AtomicU64::new(0)),
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Samples rendered so far.
    pub fn samples(&self) -> u64 {
        self.samples.load(Ordering::Acquire)
    }

    /// Audio time in seconds.
    pub fn now(&self) -> f64 {
        self.samples() as f64 / self.sample_rate as f64
    }

    pub fn advance(&self, frames: usize) {
        self.samples.fetch_add(frames as u64, Ordering::AcqRel);
    }

    /// First sample at or after `time` seconds.
    pub fn sample_at(&self, time: f64) -> u64 {
        if !(time > 0.0) {
            return 0;
        }
        (time * self.sample_rate as f64).ceil() as u64
    }
}

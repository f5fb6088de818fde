use std::time::Duration;

use crate::{dsp::oscillator::Waveform, landmarks::hand::DetectionResult, synth::message::SynthParam};

/*
Collaborators
=============

The control loop owns neither the tracker nor the synthesizer. Both are injected
at construction:

    HandDetector ──detect(t)──→ DetectionResult ──→ ControlLoop ──→ AudioChain
                                                                  set_target_at_time(param, v, t0, τ)

Readiness: a collaborator whose setup is still in flight (device opening,
model loading, file still being read) reports `is_ready() == false`. The
session refuses to run a frame until both report ready, so the mapping core
never sees a half-built instrument.
*/

/// The synthesizer side: a chain of smoothed parameters on an audio clock.
pub trait AudioChain {
    fn is_ready(&self) -> bool {
        true
    }

    /// Current audio-clock time in seconds.
    fn current_time(&self) -> f64;

    /// Chase `target` from `start_time` with time constant `time_constant`.
    fn set_target_at_time(&mut self, param: SynthParam, target: f32, start_time: f64, time_constant: f32);

    /// The oscillator frequency held when no pitch hand is present.
    fn frequency(&self) -> f32;

    fn set_waveform(&mut self, waveform: Waveform);
}

/// The hand-tracking side.
pub trait HandDetector {
    fn is_ready(&self) -> bool {
        true
    }

    /// Hands visible at `timestamp` (time since the session started).
    fn detect(&mut self, timestamp: Duration) -> DetectionResult;
}

impl<C: AudioChain + ?Sized> AudioChain for &mut C {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn set_target_at_time(&mut self, param: SynthParam, target: f32, start_time: f64, time_constant: f32) {
        (**self).set_target_at_time(param, target, start_time, time_constant)
    }

    fn frequency(&self) -> f32 {
        (**self).frequency()
    }

    fn set_waveform(&mut self, waveform: Waveform) {
        (**self).set_waveform(waveform)
    }
}

impl<D: HandDetector + ?Sized> HandDetector for Box<D> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn detect(&mut self, timestamp: Duration) -> DetectionResult {
        (**self).detect(timestamp)
    }
}

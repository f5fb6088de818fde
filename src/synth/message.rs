use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::dsp::oscillator::Waveform;

/// Parameters of the chain the control side can drive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SynthParam {
    OscillatorFrequency,
    FilterCutoff,
    FilterResonance,
    Gain,
}

impl SynthParam {
    pub const ALL: [SynthParam; 4] = [
        SynthParam::OscillatorFrequency,
        SynthParam::FilterCutoff,
        SynthParam::FilterResonance,
        SynthParam::Gain,
    ];

    pub fn index(self) -> usize {
        match self {
            SynthParam::OscillatorFrequency => 0,
            SynthParam::FilterCutoff => 1,
            SynthParam::FilterResonance => 2,
            SynthParam::Gain => 3,
        }
    }
}

/// Control → audio thread messages.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParamMessage {
    /// Chase `target` from `start_time` (seconds on the chain clock) with
    /// time constant `time_constant` (seconds).
    SetTarget {
        param: SynthParam,
        target: f32,
        start_time: f64,
        time_constant: f32,
    },
    SetWaveform(Waveform),
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ParamMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ParamMessage> {
    fn pop(&mut self) -> Option<ParamMessage> {
        Consumer::pop(self).ok()
    }
}

/// Single-threaded receiver for offline rendering.
impl MessageReceiver for VecDeque<ParamMessage> {
    fn pop(&mut self) -> Option<ParamMessage> {
        self.pop_front()
    }
}

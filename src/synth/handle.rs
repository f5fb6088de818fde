use rtrb::{Consumer, Producer, RingBuffer};
use tracing::warn;

use crate::{
    control::AudioChain,
    dsp::oscillator::Waveform,
    synth::{
        chain::{SynthChain, DEFAULT_FREQUENCY_HZ},
        clock::SampleClock,
        message::{ParamMessage, SynthParam},
    },
};

/// Room for a few dozen frames of parameter updates (five messages per frame
/// at most) before the audio thread has to catch up.
pub const PARAM_QUEUE_CAPACITY: usize = 256;

/// Control-side end of a [`SynthChain`].
///
/// Holds the producer half of the parameter queue and a clone of the chain's
/// clock, so the control loop can schedule changes at "current audio time"
/// without ever touching the audio thread.
pub struct ChainHandle {
    tx: Producer<ParamMessage>,
    clock: SampleClock,
    last_frequency: f32,
}

/// Build a connected handle/chain pair. The chain goes to the audio callback,
/// the handle to the control loop.
pub fn build_chain(
    sample_rate: f32,
    capacity: usize,
) -> (ChainHandle, SynthChain<Consumer<ParamMessage>>) {
    let (tx, rx) = RingBuffer::<ParamMessage>::new(capacity);
    let clock = SampleClock::new(sample_rate);

    let handle = ChainHandle {
        tx,
        clock: clock.clone(),
        last_frequency: DEFAULT_FREQUENCY_HZ,
    };
    (handle, SynthChain::new(rx, clock))
}

impl ChainHandle {
    pub fn clock(&self) -> &SampleClock {
        &self.clock
    }

    fn send(&mut self, msg: ParamMessage) -> bool {
        match self.tx.push(msg) {
            Ok(()) => true,
            Err(_) => {
                warn!(?msg, "parameter queue full, dropping update");
                false
            }
        }
    }
}

impl AudioChain for ChainHandle {
    fn current_time(&self) -> f64 {
        self.clock.now()
    }

    fn set_target_at_time(&mut self, param: SynthParam, target: f32, start_time: f64, time_constant: f32) {
        let sent = self.send(ParamMessage::SetTarget {
            param,
            target,
            start_time,
            time_constant,
        });
        if sent && param == SynthParam::OscillatorFrequency {
            self.last_frequency = target;
        }
    }

    fn frequency(&self) -> f32 {
        self.last_frequency
    }

    fn set_waveform(&mut self, waveform: Waveform) {
        self.send(ParamMessage::SetWaveform(waveform));
    }
}

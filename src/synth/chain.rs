use crate::{
    dsp::{
        amplify::multiply_in_place,
        filter::SVFilter,
        oscillator::{Oscillator, Waveform},
        smoothing::SmoothedParam,
    },
    mapping::effect::FilterPreset,
    synth::{
        clock::SampleClock,
        message::{MessageReceiver, ParamMessage, SynthParam},
    },
    MAX_BLOCK_SIZE,
};

/*
Signal Chain
============

    ┌────────────┐     ┌──────────────┐     ┌──────┐
    │ Oscillator │ ──→ │ SVF lowpass  │ ──→ │ Gain │ ──→ out
    └────────────┘     └──────────────┘     └──────┘
          ↑               ↑         ↑           ↑
      frequency        cutoff       Q         gain        (all smoothed)

The chain lives on the audio thread. The control side never touches it
directly: it sends `ParamMessage`s, which are drained at the top of every
render call and turned into smoothed targets. Each parameter then moves one
step per sample, so the audio reacts on the audio clock no matter how
irregularly the video frames arrive.

Starting state matches a freshly started instrument: 440 Hz, filter wide open,
gain at zero (silent until the first frame sets a volume).
*/

pub const DEFAULT_FREQUENCY_HZ: f32 = 440.0;

pub struct SynthChain<R: MessageReceiver> {
    rx: R,
    clock: SampleClock,
    waveform: Waveform,
    osc: Oscillator,
    filter: SVFilter,
    params: [SmoothedParam; 4],
    gain_buffer: Vec<f32>,
}

impl<R: MessageReceiver> SynthChain<R> {
    pub fn new(rx: R, clock: SampleClock) -> Self {
        let mut params = [
            SmoothedParam::new(0.0),
            SmoothedParam::new(0.0),
            SmoothedParam::new(0.0),
            SmoothedParam::new(0.0),
        ];
        params[SynthParam::OscillatorFrequency.index()].set_immediate(DEFAULT_FREQUENCY_HZ);
        params[SynthParam::FilterCutoff.index()].set_immediate(FilterPreset::TRANSPARENT.cutoff_hz);
        params[SynthParam::FilterResonance.index()].set_immediate(FilterPreset::TRANSPARENT.q);
        params[SynthParam::Gain.index()].set_immediate(0.0);

        Self {
            rx,
            clock,
            waveform: Waveform::default(),
            osc: Oscillator::new(),
            filter: SVFilter::new(),
            params,
            gain_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    /// Render mono audio into `out`, advancing the shared clock.
    pub fn render(&mut self, out: &mut [f32]) {
        self.drain_messages();

        for block in out.chunks_mut(MAX_BLOCK_SIZE) {
            self.render_block(block);
        }
    }

    fn drain_messages(&mut self) {
        let sample_rate = self.clock.sample_rate();
        while let Some(msg) = self.rx.pop() {
            match msg {
                ParamMessage::SetTarget {
                    param,
                    target,
                    start_time,
                    time_constant,
                } => {
                    let start_sample = self.clock.sample_at(start_time);
                    self.params[param.index()].set_target_at(
                        target,
                        start_sample,
                        time_constant,
                        sample_rate,
                    );
                }
                ParamMessage::SetWaveform(waveform) => self.waveform = waveform,
            }
        }
    }

    fn render_block(&mut self, out: &mut [f32]) {
        let sample_rate = self.clock.sample_rate();
        let start = self.clock.samples();
        let gains = &mut self.gain_buffer[..out.len()];
        let [frequency, cutoff, resonance, gain] = &mut self.params;

        for (i, (sample, g)) in out.iter_mut().zip(gains.iter_mut()).enumerate() {
            let n = start + i as u64;

            let raw = self.osc.next_sample(self.waveform, frequency.next(n), sample_rate);
            *sample = self
                .filter
                .lowpass(raw, cutoff.next(n), resonance.next(n), sample_rate);
            *g = gain.next(n);
        }

        multiply_in_place(out, gains);
        self.clock.advance(out.len());
    }

    pub fn param(&self, param: SynthParam) -> &SmoothedParam {
        &self.params[param.index()]
    }

    pub fn frequency(&self) -> f32 {
        self.param(SynthParam::OscillatorFrequency).value()
    }

    pub fn cutoff(&self) -> f32 {
        self.param(SynthParam::FilterCutoff).value()
    }

    pub fn resonance(&self) -> f32 {
        self.param(SynthParam::FilterResonance).value()
    }

    pub fn gain(&self) -> f32 {
        self.param(SynthParam::Gain).value()
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn clock(&self) -> &SampleClock {
        &self.clock
    }
}

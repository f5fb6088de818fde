use serde::{Deserialize, Serialize};
use tracing::debug;

use super::collaborators::AudioChain;
use crate::synth::message::SynthParam;

/*
Parameter Smoother
==================

Nothing the hands produce is applied to the chain as a step. Each target is
handed over as "approach this value from now on, with time constant τ":

    value
      ↑        target
      │      ┌ ─ ─ ─ ─ ─ ─ ─ ─ ─
      │    .·'
      │  .'        63% of the gap after τ
      │ /          95% after 3τ
      │/
      └──────────────────────→ audio time
      now

Pitch and filter use the short constant so notes and the wah feel immediate.
Volume uses a longer one; fast gain moves pump audibly.

A target that is not finite (an empty scale, a degenerate hand) is dropped
here and never reaches the chain; whatever the chain was chasing before keeps
going.
*/

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingSettings {
    /// Seconds, for oscillator frequency.
    pub frequency_tau: f32,
    /// Seconds, for filter cutoff and resonance.
    pub filter_tau: f32,
    /// Seconds, for gain.
    pub volume_tau: f32,
}

impl Default for SmoothingSettings {
    fn default() -> Self {
        Self {
            frequency_tau: 0.01,
            filter_tau: 0.01,
            volume_tau: 0.02,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParameterSmoother {
    settings: SmoothingSettings,
    last_applied: [Option<f32>; 4],
}

impl ParameterSmoother {
    pub fn new(settings: SmoothingSettings) -> Self {
        Self {
            settings,
            last_applied: [None; 4],
        }
    }

    pub fn settings(&self) -> &SmoothingSettings {
        &self.settings
    }

    pub fn time_constant(&self, param: SynthParam) -> f32 {
        match param {
            SynthParam::OscillatorFrequency => self.settings.frequency_tau,
            SynthParam::FilterCutoff | SynthParam::FilterResonance => self.settings.filter_tau,
            SynthParam::Gain => self.settings.volume_tau,
        }
    }

    /// Schedule `target` on `chain` at its current time.
    ///
    /// Returns `false`, leaving the chain untouched, if `target` is not finite.
    pub fn push<C: AudioChain + ?Sized>(&mut self, chain: &mut C, param: SynthParam, target: f32) -> bool {
        if !target.is_finite() {
            debug!(?param, target, "dropping non-finite target");
            return false;
        }

        let now = chain.current_time();
        chain.set_target_at_time(param, target, now, self.time_constant(param));
        self.last_applied[param.index()] = Some(target);
        true
    }

    /// Last target forwarded for `param`, if any.
    pub fn last_applied(&self, param: SynthParam) -> Option<f32> {
        self.last_applied[param.index()]
    }
}

impl Default for ParameterSmoother {
    fn default() -> Self {
        Self::new(SmoothingSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::Waveform;

    #[derive(Default)]
    struct Recorder {
        now: f64,
        calls: Vec<(SynthParam, f32, f64, f32)>,
    }

    impl AudioChain for Recorder {
        fn current_time(&self) -> f64 {
            self.now
        }

        fn set_target_at_time(&mut self, param: SynthParam, target: f32, start_time: f64, time_constant: f32) {
            self.calls.push((param, target, start_time, time_constant));
        }

        fn frequency(&self) -> f32 {
            440.0
        }

        fn set_waveform(&mut self, _: Waveform) {}
    }

    #[test]
    fn uses_chain_time_and_per_param_constants() {
        let mut chain = Recorder {
            now: 1.25,
            ..Default::default()
        };
        let mut smoother = ParameterSmoother::default();

        assert!(smoother.push(&mut chain, SynthParam::OscillatorFrequency, 261.63));
        assert!(smoother.push(&mut chain, SynthParam::Gain, 0.3));

        assert_eq!(chain.calls[0], (SynthParam::OscillatorFrequency, 261.63, 1.25, 0.01));
        assert_eq!(chain.calls[1], (SynthParam::Gain, 0.3, 1.25, 0.02));
        assert_eq!(smoother.time_constant(SynthParam::FilterResonance), 0.01);
    }

    #[test]
    fn non_finite_targets_never_reach_chain() {
        let mut chain = Recorder::default();
        let mut smoother = ParameterSmoother::default();

        assert!(smoother.push(&mut chain, SynthParam::FilterCutoff, 800.0));
        assert!(!smoother.push(&mut chain, SynthParam::FilterCutoff, f32::NAN));
        assert!(!smoother.push(&mut chain, SynthParam::FilterCutoff, f32::INFINITY));
        assert!(!smoother.push(&mut chain, SynthParam::Gain, f32::NEG_INFINITY));

        assert_eq!(chain.calls.len(), 1);
        assert_eq!(smoother.last_applied(SynthParam::FilterCutoff), Some(800.0));
        assert_eq!(smoother.last_applied(SynthParam::Gain), None);
    }
}

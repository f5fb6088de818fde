use std::f32::consts::PI;

/*
State-Variable Lowpass (TPT)
============================

The wah is a resonant lowpass: a low cutoff with a tall resonant peak sounds
vocal, a cutoff at the top of the audio band with a flat response is
effectively transparent.

  gain (dB)
     +20 ┤        ╱╲               Q = 12, cutoff 800 Hz ("wah")
         │       ╱  ╲
       0 ┼──────╯    ╲
         │            ╲
     -20 ┤             ╲
         └──────┬───────┬────→ Hz
               800    20k

Resonance is given as a quality factor Q. The state-variable topology uses
its reciprocal as the damping term:

    k = 1 / Q         Q = 1 → k = 1 (flat-ish)    Q = 12 → k ≈ 0.083 (peaky)

    g  = tan(π · fc / fs)
    a1 = 1 / (1 + g(g + k))
    a2 = g · a1
    a3 = g · a2

Per sample, with integrator memories ic1, ic2:

    v3 = x - ic2
    v1 = a1·ic1 + a2·v3          bandpass
    v2 = ic2 + a2·ic1 + a3·v3    lowpass
    ic1 = 2·v1 - ic1
    ic2 = 2·v2 - ic2

The topology-preserving transform keeps the filter stable under per-sample
cutoff and Q changes, which is exactly what the smoothed wah toggle does.
Cutoff is clamped below Nyquist, where tan() blows up.
*/

pub const MIN_CUTOFF_HZ: f32 = 20.0;
pub const MIN_Q: f32 = 0.1;
pub const MAX_Q: f32 = 30.0;

/// Fraction of the sample rate the cutoff may approach.
const MAX_CUTOFF_RATIO: f32 = 0.45;

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory
}

impl SVFilter {
    pub fn new() -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
        }
    }

    #[inline]
    pub fn clamp_cutoff(cutoff_hz: f32, sample_rate: f32) -> f32 {
        cutoff_hz.clamp(MIN_CUTOFF_HZ, sample_rate * MAX_CUTOFF_RATIO)
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32, cutoff_hz: f32, q: f32, sample_rate: f32) -> FilterOutputs {
        let cutoff = Self::clamp_cutoff(cutoff_hz, sample_rate);
        let k = 1.0 / q.clamp(MIN_Q, MAX_Q);
        let g = (PI * cutoff / sample_rate).tan();

        let a1 = 1.0 / (1.0 + g * (g + k));
        let a2 = g * a1;
        let a3 = g * a2;

        let v3 = sample - self.ic2eq;
        let v1 = a1 * self.ic1eq + a2 * v3;
        let v2 = self.ic2eq + a2 * self.ic1eq + a3 * v3;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
        }
    }

    #[inline]
    pub fn lowpass(&mut self, sample: f32, cutoff_hz: f32, q: f32, sample_rate: f32) -> f32 {
        self.next_sample(sample, cutoff_hz, q, sample_rate).lowpass
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}

impl Default for SVFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::{Oscillator, Waveform};

    const SAMPLE_RATE: f32 = 48_000.0;

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len() / 2;
        buffer
            .get(skip..)
            .unwrap_or(buffer)
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    fn filtered_sine(freq: f32, cutoff: f32, q: f32) -> Vec<f32> {
        let mut osc = Oscillator::new();
        let mut filter = SVFilter::new();
        (0..2048)
            .map(|_| {
                let s = osc.next_sample(Waveform::Sine, freq, SAMPLE_RATE);
                filter.lowpass(s, cutoff, q, SAMPLE_RATE)
            })
            .collect()
    }

    #[test]
    fn dc_passes_lowpass() {
        let mut filter = SVFilter::new();
        let mut last = 0.0;
        for _ in 0..512 {
            last = filter.lowpass(1.0, 500.0, 0.707, SAMPLE_RATE);
        }
        assert!(last > 0.99, "got {last}");
    }

    #[test]
    fn transparent_preset_passes_musical_range() {
        let peak = peak_after_transient(&filtered_sine(440.0, 20_000.0, 1.0));
        assert!((peak - 1.0).abs() < 0.05, "got {peak}");
    }

    #[test]
    fn vocal_preset_attenuates_above_cutoff() {
        let peak = peak_after_transient(&filtered_sine(5_000.0, 800.0, 12.0));
        assert!(peak < 0.1, "expected attenuation, got {peak}");
    }

    #[test]
    fn vocal_preset_resonates_at_cutoff() {
        let at_cutoff = peak_after_transient(&filtered_sine(800.0, 800.0, 12.0));
        let flat = peak_after_transient(&filtered_sine(800.0, 800.0, 1.0));
        assert!(
            at_cutoff > flat * 4.0,
            "expected resonant boost: q12={at_cutoff}, q1={flat}"
        );
    }

    #[test]
    fn cutoff_is_clamped_below_nyquist() {
        assert!((SVFilter::clamp_cutoff(30_000.0, SAMPLE_RATE) - 21_600.0).abs() < 0.01);
        assert_eq!(SVFilter::clamp_cutoff(1.0, SAMPLE_RATE), MIN_CUTOFF_HZ);

        let mut filter = SVFilter::new();
        for _ in 0..256 {
            assert!(filter.lowpass(0.5, 1.0e9, 1.0, SAMPLE_RATE).is_finite());
        }
    }
}

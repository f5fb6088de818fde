use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/*
Oscillator
==========

A phase accumulator drives every waveform. Phase runs 0.0 → 1.0 once per
cycle and wraps:

    phase += frequency / sample_rate

    sine       sin(2π·phase)
    square     +1 for the first half cycle, -1 for the second
    sawtooth   2·phase - 1                  (ramp up, snap down)
    triangle   1 - 4·|phase - 0.5|          (ramp up, ramp down)

Frequency may change on every sample (the chain glides it between notes);
because only the increment changes, the waveform stays continuous and never
clicks on a pitch change.

Square and sawtooth are naive (not band-limited) and alias audibly at high
pitches. The playable range tops out below 1 kHz, where that is acceptable.
*/

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::Triangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }

    /// Next waveform in [`Waveform::ALL`], wrapping.
    pub fn cycle(self) -> Self {
        let index = Self::ALL.iter().position(|&w| w == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    #[inline]
    fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown waveform `{s}` (expected sine, square, sawtooth or triangle)"))
    }
}

pub struct Oscillator {
    phase: f32,
}

impl Oscillator {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Produce one sample and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, waveform: Waveform, frequency: f32, sample_rate: f32) -> f32 {
        let out = waveform.sample(self.phase);

        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();
        out
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new()
    }
}

//! Wah filter presets.
//!
//! The wah is a toggle between two settings of the lowpass filter rather than
//! a swept effect: a low, sharply resonant cutoff for the vocal "wah" and a
//! wide-open, flat setting that leaves the oscillator untouched.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterPreset {
    pub cutoff_hz: f32,
    /// Resonance as a quality factor.
    pub q: f32,
}

impl FilterPreset {
    pub const VOCAL: Self = Self {
        cutoff_hz: 800.0,
        q: 12.0,
    };

    pub const TRANSPARENT: Self = Self {
        cutoff_hz: 20_000.0,
        q: 1.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WahPresets {
    pub active: FilterPreset,
    pub inactive: FilterPreset,
}

impl WahPresets {
    pub fn for_state(&self, wah_active: bool) -> FilterPreset {
        if wah_active {
            self.active
        } else {
            self.inactive
        }
    }
}

impl Default for WahPresets {
    fn default() -> Self {
        Self {
            active: FilterPreset::VOCAL,
            inactive: FilterPreset::TRANSPARENT,
        }
    }
}

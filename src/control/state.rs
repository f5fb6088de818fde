use std::fmt;

use crate::synth::chain::DEFAULT_FREQUENCY_HZ;

/// Cross-frame memory of the instrument. Mutated once per frame by the
/// control loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    /// Last frequency target handed to the chain. Held while no pitch hand
    /// is visible.
    pub current_frequency_hz: f32,
    pub current_volume: f32,
    pub wah_active: bool,
    /// Openness of this frame's pitch hand, `None` without one.
    pub pitch_openness: Option<f32>,
}

impl ControlState {
    pub fn new(baseline_frequency_hz: f32) -> Self {
        Self {
            current_frequency_hz: baseline_frequency_hz,
            current_volume: 0.0,
            wah_active: false,
            pitch_openness: None,
        }
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            pitch: match self.pitch_openness {
                Some(openness) => format!("{:.0}%", openness * 100.0),
                None => "---".to_string(),
            },
            volume: format!("{:.2}", self.current_volume),
            wah: WahDisplay::from(self.wah_active),
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::new(DEFAULT_FREQUENCY_HZ)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WahDisplay {
    On,
    Off,
}

impl From<bool> for WahDisplay {
    fn from(active: bool) -> Self {
        if active {
            WahDisplay::On
        } else {
            WahDisplay::Off
        }
    }
}

impl fmt::Display for WahDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WahDisplay::On => "ON",
            WahDisplay::Off => "OFF",
        })
    }
}

/// What the presentation layer shows for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySnapshot {
    /// Pitch-hand openness as a whole percentage, or `---`.
    pub pitch: String,
    /// Volume to two decimals.
    pub volume: String,
    pub wah: WahDisplay,
}

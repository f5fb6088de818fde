//! Turning role-assigned hands into control values.

/// Filter presets toggled by the wah gesture.
pub mod effect;
/// Pitch, volume and wah mappers.
pub mod gestures;
/// Musical scales and the named scale book.
pub mod scale;

pub use effect::{FilterPreset, WahPresets};
pub use gestures::{map_pitch, map_volume, map_wah, MappingSettings, PitchReading};
pub use scale::{MusicalScale, ScaleBook};

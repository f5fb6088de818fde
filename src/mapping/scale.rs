use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/*
Playable Scales
===============

The pitch hand does not bend pitch continuously. Openness is quantised onto a
fixed ladder of frequencies so the instrument always lands on a note:

    index = floor( openness × (len - 1) )      clamped to [0, len - 1]

With a 5-note scale:

    openness   0.0   0.25  0.5   0.75  1.0
    index      0     1     2     3     4

Because of the floor, the top note is only reached with a fully open hand.
That is deliberate: it gives the lowest notes the widest catch area, where a
relaxed hand tends to sit.

Built-in ladders start at C3 (130.81 Hz) and span a little over two octaves.
*/

pub const PENTATONIC: [f32; 14] = [
    130.81, 146.83, 164.81, 196.00, 220.00, 261.63, 293.66, 329.63, 392.00, 440.00, 523.25,
    659.25, 783.99, 880.00,
];

pub const MAJOR: [f32; 14] = [
    130.81, 146.83, 164.81, 174.61, 196.00, 220.00, 246.94, 261.63, 293.66, 329.63, 349.23,
    392.00, 440.00, 493.88,
];

pub const MINOR: [f32; 14] = [
    130.81, 146.83, 155.56, 174.61, 196.00, 207.65, 233.08, 261.63, 293.66, 311.13, 349.23,
    392.00, 415.30, 466.16,
];

pub const BLUES: [f32; 12] = [
    130.81, 155.56, 174.61, 185.00, 196.00, 233.08, 261.63, 311.13, 349.23, 369.99, 392.00,
    466.16,
];

pub const DEFAULT_SCALE: &str = "pentatonic";

/// An ascending ladder of playable frequencies in Hz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MusicalScale {
    frequencies: Vec<f32>,
}

impl MusicalScale {
    /// No validation happens here; see [`MusicalScale::validate`].
    pub fn new(frequencies: Vec<f32>) -> Self {
        Self { frequencies }
    }

    pub fn frequencies(&self) -> &[f32] {
        &self.frequencies
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Note index selected by an openness value.
    pub fn index_for(&self, openness: f32) -> Option<usize> {
        if self.is_empty() || !openness.is_finite() {
            return None;
        }
        let last = (self.len() - 1) as f32;
        Some((openness * last).floor().clamp(0.0, last) as usize)
    }

    /// Frequency selected by an openness value.
    pub fn frequency_for(&self, openness: f32) -> Option<f32> {
        self.index_for(openness)
            .and_then(|index| self.frequencies.get(index).copied())
    }

    /// Non-empty, finite, positive and strictly ascending.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        let invalid = |reason| ConfigError::InvalidScale {
            name: name.to_string(),
            reason,
        };

        if self.is_empty() {
            return Err(invalid("scale has no notes"));
        }
        if self.frequencies.iter().any(|f| !f.is_finite() || *f <= 0.0) {
            return Err(invalid("frequencies must be finite and positive"));
        }
        if self.frequencies.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(invalid("frequencies must be strictly ascending"));
        }
        Ok(())
    }
}

impl From<&[f32]> for MusicalScale {
    fn from(frequencies: &[f32]) -> Self {
        Self::new(frequencies.to_vec())
    }
}

/// Named scales the performer can switch between.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBook {
    scales: BTreeMap<String, MusicalScale>,
}

impl ScaleBook {
    pub fn empty() -> Self {
        Self {
            scales: BTreeMap::new(),
        }
    }

    /// The four scales that ship with the instrument.
    pub fn builtin() -> Self {
        let mut book = Self::empty();
        book.insert("pentatonic", MusicalScale::from(&PENTATONIC[..]));
        book.insert("major", MusicalScale::from(&MAJOR[..]));
        book.insert("minor", MusicalScale::from(&MINOR[..]));
        book.insert("blues", MusicalScale::from(&BLUES[..]));
        book
    }

    /// Adds or replaces a scale.
    pub fn insert(&mut self, name: impl Into<String>, scale: MusicalScale) {
        self.scales.insert(name.into(), scale);
    }

    pub fn get(&self, name: &str) -> Option<&MusicalScale> {
        self.scales.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scales.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// Name following `current` in sorted order, wrapping around.
    pub fn next_name(&self, current: &str) -> Option<&str> {
        let mut names = self.names();
        let first = self.names().next();
        names
            .position(|name| name == current)
            .and_then(|_| names.next())
            .or(first)
    }
}

impl Default for ScaleBook {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_notes() -> MusicalScale {
        MusicalScale::new(vec![100.0, 200.0, 300.0, 400.0, 500.0])
    }

    #[test]
    fn openness_extremes_pick_first_and_last_note() {
        let scale = five_notes();
        assert_eq!(scale.index_for(1.0), Some(4));
        assert_eq!(scale.index_for(0.0), Some(0));
        assert_eq!(scale.frequency_for(1.0), Some(500.0));
        assert_eq!(scale.frequency_for(0.0), Some(100.0));
    }

    #[test]
    fn index_floors_and_clamps() {
        let scale = five_notes();
        assert_eq!(scale.index_for(0.49), Some(1));
        assert_eq!(scale.index_for(0.5), Some(2));
        assert_eq!(scale.index_for(0.999), Some(3));
        assert_eq!(scale.index_for(7.0), Some(4));
        assert_eq!(scale.index_for(-1.0), Some(0));
    }

    #[test]
    fn empty_scale_selects_nothing() {
        let scale = MusicalScale::new(Vec::new());
        assert_eq!(scale.index_for(0.5), None);
        assert_eq!(scale.frequency_for(0.5), None);
    }

    #[test]
    fn single_note_scale_always_plays_it() {
        let scale = MusicalScale::new(vec![261.63]);
        assert_eq!(scale.frequency_for(0.0), Some(261.63));
        assert_eq!(scale.frequency_for(1.0), Some(261.63));
    }

    #[test]
    fn builtin_scales_are_valid() {
        let book = ScaleBook::builtin();
        assert_eq!(book.names().collect::<Vec<_>>(), ["blues", "major", "minor", "pentatonic"]);
        for name in book.names() {
            book.get(name).unwrap().validate(name).expect("builtin scale");
        }
        assert_eq!(book.get("blues").unwrap().len(), 12);
    }

    #[test]
    fn validate_rejects_bad_ladders() {
        assert!(MusicalScale::new(vec![]).validate("x").is_err());
        assert!(MusicalScale::new(vec![200.0, 100.0]).validate("x").is_err());
        assert!(MusicalScale::new(vec![100.0, f32::NAN]).validate("x").is_err());
        assert!(MusicalScale::new(vec![100.0, 100.0]).validate("x").is_err());
    }

    #[test]
    fn next_name_wraps() {
        let book = ScaleBook::builtin();
        assert_eq!(book.next_name("blues"), Some("major"));
        assert_eq!(book.next_name("pentatonic"), Some("blues"));
        assert_eq!(book.next_name("unknown"), Some("blues"));
    }
}

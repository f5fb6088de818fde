//! Instrument configuration.
//!
//! Everything is optional in the YAML file; omitted fields take the values
//! the instrument was tuned with. A minimal file that only changes the scale:
//!
//! ```yaml
//! scale: blues
//! ```
//!
//! A fuller one:
//!
//! ```yaml
//! scale: hirajoshi
//! waveform: triangle
//! tie_break: higher_score
//! calibration:
//!   min_open: 0.06
//!   max_open: 0.32
//! mapping:
//!   max_volume: 0.6
//! smoothing:
//!   volume_tau: 0.03
//! scales:
//!   hirajoshi: [130.81, 146.83, 155.56, 196.0, 207.65, 261.63]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    control::smoother::SmoothingSettings,
    dsp::oscillator::Waveform,
    error::ConfigError,
    landmarks::{geometry::OpennessCalibration, roles::TieBreak},
    mapping::{
        effect::{FilterPreset, WahPresets},
        gestures::MappingSettings,
        scale::{MusicalScale, ScaleBook, DEFAULT_SCALE},
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandsynthConfig {
    /// Name of the scale selected at startup.
    pub scale: String,
    pub waveform: Waveform,
    pub calibration: OpennessCalibration,
    pub mapping: MappingSettings,
    pub smoothing: SmoothingSettings,
    pub wah: WahPresets,
    pub tie_break: TieBreak,
    /// User scales, added to (or replacing) the built-in ones.
    pub scales: BTreeMap<String, MusicalScale>,
}

impl Default for HandsynthConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE.to_string(),
            waveform: Waveform::default(),
            calibration: OpennessCalibration::default(),
            mapping: MappingSettings::default(),
            smoothing: SmoothingSettings::default(),
            wah: WahPresets::default(),
            tie_break: TieBreak::default(),
            scales: BTreeMap::new(),
        }
    }
}

impl HandsynthConfig {
    /// Read, parse and validate a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: HandsynthConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calibration.validate()?;

        unit_range("mapping.max_volume", self.mapping.max_volume)?;
        unit_range("mapping.one_hand_volume", self.mapping.one_hand_volume)?;
        unit_range("mapping.pitch_boundary_x", self.mapping.pitch_boundary_x)?;
        positive("mapping.pinch_threshold", self.mapping.pinch_threshold)?;

        non_negative("smoothing.frequency_tau", self.smoothing.frequency_tau)?;
        non_negative("smoothing.filter_tau", self.smoothing.filter_tau)?;
        non_negative("smoothing.volume_tau", self.smoothing.volume_tau)?;

        filter_preset("wah.active", &self.wah.active)?;
        filter_preset("wah.inactive", &self.wah.inactive)?;

        for (name, scale) in &self.scales {
            scale.validate(name)?;
        }

        if self.scale_book().get(&self.scale).is_none() {
            return Err(ConfigError::InvalidScale {
                name: self.scale.clone(),
                reason: "no scale with that name",
            });
        }

        Ok(())
    }

    /// Built-in scales with the user's scales merged over them.
    pub fn scale_book(&self) -> ScaleBook {
        let mut book = ScaleBook::builtin();
        for (name, scale) in &self.scales {
            book.insert(name.clone(), scale.clone());
        }
        book
    }
}

fn unit_range(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn filter_preset(field: &'static str, preset: &FilterPreset) -> Result<(), ConfigError> {
    positive(field, preset.cutoff_hz)?;
    positive(field, preset.q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = HandsynthConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, HandsynthConfig::default());
        assert_eq!(config.scale, "pentatonic");
        assert_eq!(config.mapping.max_volume, 0.7);
        assert_eq!(config.smoothing.volume_tau, 0.02);
        assert_eq!(config.wah.active, FilterPreset::VOCAL);
        assert_eq!(config.tie_break, TieBreak::LastWins);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let yaml = r#"
scale: hirajoshi
waveform: triangle
tie_break: higher_score
calibration:
  max_open: 0.3
smoothing:
  volume_tau: 0.05
scales:
  hirajoshi: [130.81, 146.83, 155.56, 196.0, 207.65]
"#;
        let config = HandsynthConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.waveform, Waveform::Triangle);
        assert_eq!(config.tie_break, TieBreak::HigherScore);
        assert_eq!(config.calibration.min_open, 0.08);
        assert_eq!(config.calibration.max_open, 0.3);
        assert_eq!(config.smoothing.frequency_tau, 0.01);
        assert_eq!(config.smoothing.volume_tau, 0.05);

        let book = config.scale_book();
        assert_eq!(book.len(), 5);
        assert_eq!(book.get("hirajoshi").map(MusicalScale::len), Some(5));
    }

    #[test]
    fn rejects_bad_calibration() {
        let err = HandsynthConfig::from_yaml_str("calibration: {min_open: 0.3, max_open: 0.1}").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCalibration { .. }));
    }

    #[test]
    fn rejects_unsorted_scale() {
        let err = HandsynthConfig::from_yaml_str("scales: {bad: [220.0, 110.0]}").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidScale { ref name, .. } if name == "bad"));
    }

    #[test]
    fn rejects_unknown_startup_scale() {
        let err = HandsynthConfig::from_yaml_str("scale: lydian").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidScale { ref name, .. } if name == "lydian"));
    }

    #[test]
    fn rejects_volume_above_full_scale() {
        let err = HandsynthConfig::from_yaml_str("mapping: {max_volume: 1.5}").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "mapping.max_volume",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = HandsynthConfig::load("/nonexistent/handsynth.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/handsynth.yaml"));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = HandsynthConfig::from_yaml_str("scale: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }
}

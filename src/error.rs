//! Error types for the fallible edges of the crate.
//!
//! The per-frame mapping path never fails; everything here is raised either
//! while loading configuration, while validating detector output at the
//! boundary, or while bringing the instrument up.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration could not be loaded or failed validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("scale `{name}` is invalid: {reason}")]
    InvalidScale { name: String, reason: &'static str },

    #[error("openness calibration is invalid: max_open ({max_open}) must exceed min_open ({min_open})")]
    InvalidCalibration { min_open: f32, max_open: f32 },

    #[error("{field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },
}

/// Detector output that violates the 21-point hand invariant.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("expected {expected} landmarks per hand, got {actual}")]
    WrongCount { expected: usize, actual: usize },
}

/// A step of the startup sequence failed.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("{0} is not ready")]
    NotReady(&'static str),

    #[error("audio device unavailable: {0}")]
    AudioDevice(String),

    #[error("audio stream failed: {0}")]
    AudioStream(String),

    #[error("hand detector failed to start: {0}")]
    Detector(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

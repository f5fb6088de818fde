//! Low-level DSP primitives the audio chain is built from.
//!
//! These components are allocation-free and realtime-safe, so the audio
//! callback can own them directly. They stay focused on the signal math; the
//! `synth` layer wires them into the oscillator → filter → gain chain.

/// Per-sample gain (VCA).
pub mod amplify;
/// State-variable resonant lowpass.
pub mod filter;
/// Phase-accumulator oscillator and waveform shapes.
pub mod oscillator;
/// Exponential "set target at time" parameter smoothing.
pub mod smoothing;

pub use oscillator::Waveform;
pub use smoothing::SmoothedParam;

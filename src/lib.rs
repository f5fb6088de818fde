pub mod config; // YAML configuration
pub mod control; // Per-frame orchestration and collaborator traits
pub mod dsp;
pub mod error;
pub mod landmarks; // Hand landmarks, geometry and role assignment
pub mod mapping; // Gestures to pitch, volume and wah
pub mod synth; // The audio-thread chain and its parameter queue

pub const MAX_BLOCK_SIZE: usize = 2048;

//! Per-frame orchestration: hands in, smoothed parameter targets out.
//!
//! The control loop holds the only cross-frame state of the instrument and
//! talks to the outside world through two injected collaborators, an
//! [`AudioChain`] and a [`HandDetector`].

/// Traits for the audio chain and the hand detector.
pub mod collaborators;
/// The control loop itself.
pub mod engine;
/// Frame cadence abstraction.
pub mod scheduler;
/// Readiness-gated pairing of detector and control loop.
pub mod session;
/// Guarded, time-constant parameter pushes.
pub mod smoother;
/// Cross-frame state and the display snapshot.
pub mod state;

pub use collaborators::{AudioChain, HandDetector};
pub use engine::{ControlLoop, FrameOutput};
pub use scheduler::{FixedRateScheduler, FrameScheduler, SteppedScheduler};
pub use session::Session;
pub use smoother::{ParameterSmoother, SmoothingSettings};
pub use state::{ControlState, DisplaySnapshot, WahDisplay};

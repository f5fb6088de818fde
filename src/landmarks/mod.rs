//! Hand landmarks as delivered by the tracker, and the per-frame geometry
//! computed from them.

/// Euclidean distances and the openness metric.
pub mod geometry;
/// Landmark, hand and detection-result types plus landmark indices.
pub mod hand;
/// Synthetic hand poses for the demo performer and tests.
pub mod pose;
/// Assigning detected hands to the pitch and volume/effect roles.
pub mod roles;

pub use geometry::{distance, hand_openness, OpennessCalibration};
pub use hand::{DetectionResult, Hand, Handedness, Landmark, RawHand};
pub use pose::HandPose;
pub use roles::{HandRole, RoleAssignment, RoleClassifier, TieBreak};

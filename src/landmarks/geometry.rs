use serde::{Deserialize, Serialize};

use super::hand::{Hand, Landmark, FINGERTIPS};
use crate::error::ConfigError;

/*
Hand Openness
=============

Openness is how far the fingers are extended, measured as the mean distance
from the wrist to the five fingertips:

    mean_reach = ( |W-T4| + |W-T8| + |W-T12| + |W-T16| + |W-T20| ) / 5

Distances are taken in the image plane only (x, y). Depth estimates from
monocular trackers are too noisy to help here.

The raw mean depends on how large the hand appears, i.e. on hand size and
distance from the camera. A calibration window maps it onto [0, 1]:

    openness = clamp( (mean_reach - min_open) / (max_open - min_open), 0, 1 )

      openness
      1.0 ┤              ┌──────────
          │             ╱
          │           ╱
          │         ╱
      0.0 ┼───────┘
          └───────┬──────┬─────────→ mean_reach
               min_open max_open
                (fist)  (open hand)

Defaults were tuned for a hand roughly an arm's length from a webcam:
a closed fist reads about 0.08, a comfortably spread hand about 0.38.
*/

/// Planar (x, y) distance between two landmarks.
#[inline]
pub fn distance(a: &Landmark, b: &Landmark) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Maps mean wrist-to-fingertip reach onto `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpennessCalibration {
    /// Mean reach of a closed fist.
    pub min_open: f32,
    /// Mean reach of a fully open hand.
    pub max_open: f32,
}

impl OpennessCalibration {
    pub const DEFAULT_MIN_OPEN: f32 = 0.08;
    pub const DEFAULT_MAX_OPEN: f32 = 0.38;

    pub fn new(min_open: f32, max_open: f32) -> Result<Self, ConfigError> {
        let calibration = Self { min_open, max_open };
        calibration.validate()?;
        Ok(calibration)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = self.min_open.is_finite() && self.max_open.is_finite();
        if !finite || self.max_open <= self.min_open {
            return Err(ConfigError::InvalidCalibration {
                min_open: self.min_open,
                max_open: self.max_open,
            });
        }
        Ok(())
    }

    /// Rescale a mean reach into `[0, 1]`, saturating outside the window.
    pub fn normalize(&self, mean_reach: f32) -> f32 {
        let span = self.max_open - self.min_open;
        if span <= 0.0 {
            // Degenerate window: behave as a step at max_open.
            return if mean_reach >= self.max_open { 1.0 } else { 0.0 };
        }
        ((mean_reach - self.min_open) / span).clamp(0.0, 1.0)
    }
}

impl Default for OpennessCalibration {
    fn default() -> Self {
        Self {
            min_open: Self::DEFAULT_MIN_OPEN,
            max_open: Self::DEFAULT_MAX_OPEN,
        }
    }
}

/// Mean wrist-to-fingertip distance over the fingertips that produce a
/// finite distance. `None` when no fingertip is usable.
pub fn mean_fingertip_reach(hand: &Hand) -> Option<f32> {
    let wrist = hand.wrist();
    let (total, count) = FINGERTIPS
        .iter()
        .filter_map(|&tip| hand.landmark(tip))
        .map(|tip| distance(wrist, tip))
        .filter(|d| d.is_finite())
        .fold((0.0f32, 0u32), |(total, count), d| (total + d, count + 1));

    (count > 0).then(|| total / count as f32)
}

/// How extended the hand's fingers are, in `[0, 1]`.
pub fn hand_openness(hand: &Hand, calibration: &OpennessCalibration) -> Option<f32> {
    mean_fingertip_reach(hand).map(|reach| calibration.normalize(reach))
}

use serde::{Deserialize, Serialize};

use super::scale::MusicalScale;
use crate::landmarks::{
    geometry::{distance, hand_openness, OpennessCalibration},
    hand::{Hand, INDEX_TIP, THUMB_TIP},
    roles::{RoleAssignment, DEFAULT_PITCH_BOUNDARY_X},
};

/*
Gesture Mappers
===============

  Pitch hand (left half of frame)
    openness ──quantise──→ note in the selected scale
    no pitch hand → the last note keeps sounding

  Volume/effect hand (right half of frame)
    wrist height ──→ volume = (1 - y) × max_volume, clamped to [0, max_volume]
    thumb/index pinch ──→ wah on while closer than the threshold

  Volume fallbacks
    only a pitch hand  → one_hand_volume (play with one hand)
    no hands           → 0 (silence)

max_volume sits below full scale on purpose: a bare oscillator at unity gain
into a resonant filter is harsh and clips easily.
*/

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingSettings {
    /// Volume with the volume hand at the very top of the frame.
    pub max_volume: f32,
    /// Volume when only the pitch hand is in view.
    pub one_hand_volume: f32,
    /// Thumb/index distance below which the wah engages.
    pub pinch_threshold: f32,
    /// Wrist x separating the pitch side from the volume/effect side.
    pub pitch_boundary_x: f32,
}

impl Default for MappingSettings {
    fn default() -> Self {
        Self {
            max_volume: 0.7,
            one_hand_volume: 0.5,
            pinch_threshold: 0.05,
            pitch_boundary_x: DEFAULT_PITCH_BOUNDARY_X,
        }
    }
}

/// Result of reading a pitch hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchReading {
    pub openness: f32,
    /// `None` when there is no usable scale to quantise onto.
    pub frequency: Option<f32>,
}

/// Openness of the pitch hand quantised onto `scale`.
///
/// Returns `None` when the hand has no usable fingertips.
pub fn map_pitch(
    hand: &Hand,
    calibration: &OpennessCalibration,
    scale: Option<&MusicalScale>,
) -> Option<PitchReading> {
    let openness = hand_openness(hand, calibration)?;
    let frequency = scale.and_then(|scale| scale.frequency_for(openness));
    Some(PitchReading {
        openness,
        frequency,
    })
}

/// Volume from the height of a volume hand's wrist.
pub fn volume_from_height(hand: &Hand, max_volume: f32) -> f32 {
    let volume = (1.0 - hand.wrist().y) * max_volume;
    if volume.is_finite() {
        volume.clamp(0.0, max_volume)
    } else {
        0.0
    }
}

/// Volume for the frame, including the one-handed and no-hands fallbacks.
pub fn map_volume(roles: &RoleAssignment, settings: &MappingSettings) -> f32 {
    match (&roles.volume_effect, &roles.pitch) {
        (Some(hand), _) => volume_from_height(hand, settings.max_volume),
        (None, Some(_)) => settings.one_hand_volume,
        (None, None) => 0.0,
    }
}

/// Thumb-tip to index-tip distance.
pub fn pinch_distance(hand: &Hand) -> Option<f32> {
    let thumb = hand.landmark(THUMB_TIP)?;
    let index = hand.landmark(INDEX_TIP)?;
    let d = distance(thumb, index);
    d.is_finite().then_some(d)
}

/// Whether the volume hand is pinching.
pub fn map_wah(roles: &RoleAssignment, settings: &MappingSettings) -> bool {
    roles
        .volume_effect
        .as_ref()
        .and_then(pinch_distance)
        .is_some_and(|d| d < settings.pinch_threshold)
}

//! Hand role assignment.
//!
//! Each detected hand is given a job by where its wrist sits on screen: the
//! left half of the source frame plays pitch, the right half controls volume
//! and the wah effect. Source-frame left is the performer's right hand once
//! the preview is mirrored.

use serde::{Deserialize, Serialize};

use super::hand::{DetectionResult, Hand};

pub const DEFAULT_PITCH_BOUNDARY_X: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandRole {
    Pitch,
    VolumeEffect,
}

/// What happens when two hands land in the same role in one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The hand later in tracker order replaces the earlier one.
    #[default]
    LastWins,
    /// The hand with the higher tracker score keeps the role; equal or
    /// missing scores fall back to last-wins.
    HigherScore,
}

/// Hands chosen for each role in one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleAssignment {
    pub pitch: Option<Hand>,
    pub volume_effect: Option<Hand>,
}

impl RoleAssignment {
    pub fn hand(&self, role: HandRole) -> Option<&Hand> {
        match role {
            HandRole::Pitch => self.pitch.as_ref(),
            HandRole::VolumeEffect => self.volume_effect.as_ref(),
        }
    }

    pub fn count(&self) -> usize {
        usize::from(self.pitch.is_some()) + usize::from(self.volume_effect.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn slot_mut(&mut self, role: HandRole) -> &mut Option<Hand> {
        match role {
            HandRole::Pitch => &mut self.pitch,
            HandRole::VolumeEffect => &mut self.volume_effect,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleClassifier {
    boundary_x: f32,
    tie_break: TieBreak,
}

impl RoleClassifier {
    pub fn new(boundary_x: f32, tie_break: TieBreak) -> Self {
        Self {
            boundary_x,
            tie_break,
        }
    }

    /// Wrists strictly left of the boundary play pitch; a wrist exactly on
    /// the boundary goes to volume/effect.
    pub fn classify(&self, hand: &Hand) -> HandRole {
        if hand.wrist().x < self.boundary_x {
            HandRole::Pitch
        } else {
            HandRole::VolumeEffect
        }
    }

    pub fn assign(&self, detection: &DetectionResult) -> RoleAssignment {
        let mut roles = RoleAssignment::default();

        for hand in &detection.hands {
            let slot = roles.slot_mut(self.classify(hand));
            let replace = match (self.tie_break, slot.as_ref()) {
                (_, None) | (TieBreak::LastWins, Some(_)) => true,
                (TieBreak::HigherScore, Some(held)) => {
                    hand.score.unwrap_or(0.0) >= held.score.unwrap_or(0.0)
                }
            };
            if replace {
                *slot = Some(hand.clone());
            }
        }

        roles
    }
}

impl Default for RoleClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_PITCH_BOUNDARY_X, TieBreak::default())
    }
}

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::LandmarkError;

/*
Hand Landmarks
==============

The hand tracker reports each detected hand as 21 ordered points. The order is
what gives the points meaning: index 0 is always the wrist, and every finger
contributes four points running from the knuckle out to the tip.

             8   12  16  20        tips
             |   |   |   |
         4   7   11  15  19        DIP (thumb: IP = 3)
          \  |   |   |   |
           3 6   10  14  18        PIP
            \|   |   |   |
             2 5 - 9 - 13- 17      MCP (knuckles)
              \              /
               1            /      thumb CMC
                \          /
                 0 -------         wrist

Coordinates are normalised to the source frame: x and y run 0.0 to 1.0 from
the top-left corner, independent of whether the preview is mirrored. z is a
relative depth estimate some trackers provide; nothing in the mapping path
reads it.

A hand is either complete or absent. Partial hands are rejected at the
boundary (`Hand::from_slice`, `DetectionResult::from_raw`) so that everything
downstream can index landmarks without checking.
*/

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Fingertip indices, thumb first.
pub const FINGERTIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Skeleton edges used by the overlay.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (MIDDLE_MCP, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (RING_MCP, PINKY_MCP), (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP),
    (PINKY_DIP, PINKY_TIP),
];

/// One tracked point in normalised frame coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: None }
    }

    pub const fn with_depth(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z: Some(z) }
    }
}

/// Handedness as reported by the tracker. Carried for the overlay and for
/// the optional score tie-break; role assignment itself is positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

/// A complete 21-point hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    landmarks: [Landmark; LANDMARK_COUNT],
    pub handedness: Option<Handedness>,
    /// Tracker confidence in `[0, 1]`, when the tracker provides one.
    pub score: Option<f32>,
}

impl Hand {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self {
            landmarks,
            handedness: None,
            score: None,
        }
    }

    /// Build a hand from detector output, rejecting anything that is not
    /// exactly 21 points.
    pub fn from_slice(points: &[Landmark]) -> Result<Self, LandmarkError> {
        let landmarks: [Landmark; LANDMARK_COUNT] =
            points.try_into().map_err(|_| LandmarkError::WrongCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            })?;
        Ok(Self::new(landmarks))
    }

    pub fn with_handedness(mut self, handedness: Handedness, score: f32) -> Self {
        self.handedness = Some(handedness);
        self.score = Some(score);
        self
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    pub fn landmark(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    pub fn wrist(&self) -> &Landmark {
        &self.landmarks[WRIST]
    }
}

/// Wire shape of one hand as trackers serialise it. Landmark count is not
/// checked until it is converted into a [`Hand`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHand {
    pub landmarks: Vec<Landmark>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handedness: Option<Handedness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl TryFrom<RawHand> for Hand {
    type Error = LandmarkError;

    fn try_from(raw: RawHand) -> Result<Self, Self::Error> {
        let mut hand = Hand::from_slice(&raw.landmarks)?;
        hand.handedness = raw.handedness;
        hand.score = raw.score;
        Ok(hand)
    }
}

/// Every hand the tracker found in one frame, in tracker order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectionResult {
    pub hands: Vec<Hand>,
}

impl DetectionResult {
    pub fn new(hands: Vec<Hand>) -> Self {
        Self { hands }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Convert raw tracker output, dropping (and logging) partial hands.
    pub fn from_raw(raw: Vec<RawHand>) -> Self {
        let hands = raw
            .into_iter()
            .filter_map(|raw| match Hand::try_from(raw) {
                Ok(hand) => Some(hand),
                Err(err) => {
                    warn!("dropping partial hand: {err}");
                    None
                }
            })
            .collect();
        Self { hands }
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_requires_exactly_21_points() {
        let points = vec![Landmark::new(0.5, 0.5); 20];
        assert_eq!(
            Hand::from_slice(&points),
            Err(LandmarkError::WrongCount {
                expected: 21,
                actual: 20
            })
        );

        let points = vec![Landmark::new(0.5, 0.5); 21];
        let hand = Hand::from_slice(&points).expect("21 points is a hand");
        assert_eq!(hand.wrist(), &Landmark::new(0.5, 0.5));
        assert!(hand.landmark(LANDMARK_COUNT).is_none());
    }

    #[test]
    fn from_raw_drops_partial_hands() {
        let full = RawHand {
            landmarks: vec![Landmark::new(0.2, 0.3); 21],
            handedness: Some(Handedness::Right),
            score: Some(0.9),
        };
        let partial = RawHand {
            landmarks: vec![Landmark::new(0.7, 0.3); 5],
            ..Default::default()
        };

        let detection = DetectionResult::from_raw(vec![partial, full]);

        assert_eq!(detection.hands.len(), 1);
        assert_eq!(detection.hands[0].handedness, Some(Handedness::Right));
        assert_eq!(detection.hands[0].score, Some(0.9));
    }

    #[test]
    fn raw_hand_parses_tracker_json() {
        let point = r#"{"x":0.25,"y":0.75}"#;
        let json = format!(
            r#"{{"landmarks":[{}],"handedness":"Left","score":0.5}}"#,
            vec![point; 21].join(",")
        );

        let raw: RawHand = serde_json::from_str(&json).expect("valid json");
        let hand = Hand::try_from(raw).expect("complete hand");

        assert_eq!(hand.handedness, Some(Handedness::Left));
        assert_eq!(hand.landmarks()[INDEX_TIP], Landmark::new(0.25, 0.75));
    }

    #[test]
    fn connections_stay_in_bounds() {
        for (a, b) in HAND_CONNECTIONS {
            assert!(a < LANDMARK_COUNT && b < LANDMARK_COUNT);
        }
    }
}

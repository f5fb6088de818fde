//! Synthetic hand poses.
//!
//! Builds anatomically plausible 21-point hands from three knobs: where the
//! wrist is, how far the fingertips reach, and optionally how tight the
//! thumb/index pinch is. Used by the demo performer and by tests.

use super::hand::{
    Hand, Landmark, FINGERTIPS, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP, WRIST,
};

/// Fan angles (degrees, counter-clockwise from +x) of each finger, thumb first.
const FINGER_ANGLES_DEG: [f32; 5] = [150.0, 110.0, 90.0, 70.0, 45.0];

/// Where along the wrist→tip line each of a finger's first three joints sits.
const JOINT_FRACTIONS: [f32; 3] = [0.45, 0.65, 0.82];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    /// Wrist position in normalised frame coordinates.
    pub wrist: (f32, f32),
    /// Distance from the wrist to every fingertip.
    pub reach: f32,
    /// Thumb-tip to index-tip distance. `None` leaves the thumb in the fan.
    pub pinch: Option<f32>,
}

impl HandPose {
    pub fn new(wrist_x: f32, wrist_y: f32, reach: f32) -> Self {
        Self {
            wrist: (wrist_x, wrist_y),
            reach,
            pinch: None,
        }
    }

    pub fn pinched(mut self, distance: f32) -> Self {
        self.pinch = Some(distance);
        self
    }

    pub fn to_hand(&self) -> Hand {
        let (wx, wy) = self.wrist;
        let mut points = [Landmark::new(wx, wy); LANDMARK_COUNT];

        for (finger, (&tip, angle_deg)) in FINGERTIPS.iter().zip(FINGER_ANGLES_DEG).enumerate() {
            let angle = angle_deg.to_radians();
            // y grows downward in frame coordinates, so "up" is -y.
            let (dx, dy) = (angle.cos() * self.reach, -angle.sin() * self.reach);

            points[tip] = Landmark::new(wx + dx, wy + dy);

            // Joints run tip-3..tip-1; the thumb's first joint is its CMC.
            let first_joint = tip - 3;
            for (offset, fraction) in JOINT_FRACTIONS.iter().enumerate() {
                let fraction = if finger == 0 { (offset as f32 + 1.0) * 0.25 } else { *fraction };
                points[first_joint + offset] = Landmark::new(wx + dx * fraction, wy + dy * fraction);
            }
        }

        if let Some(distance) = self.pinch {
            let index = points[INDEX_TIP];
            points[THUMB_TIP] = Landmark::new(index.x - distance, index.y);
        }

        debug_assert_eq!(points[WRIST], Landmark::new(wx, wy));
        Hand::new(points)
    }
}

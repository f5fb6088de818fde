//! Hand sources for the terminal instrument.
//!
//! There is no camera in a terminal, so hands come either from a recording
//! or from a built-in performer.

use std::f32::consts::TAU;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use handsynth::{
    control::HandDetector,
    error::StartupError,
    landmarks::{DetectionResult, HandPose, Handedness, RawHand},
};

/// One line of a recording.
#[derive(Debug, Default, Deserialize)]
struct FrameRecord {
    #[serde(default)]
    hands: Vec<RawHand>,
}

/// Plays back recorded frames, one per control tick, looping at the end.
///
/// Recording format is JSON lines:
///
/// ```text
/// {"hands":[{"landmarks":[{"x":0.4,"y":0.6,"z":0.0}, ...21 points],"handedness":"Left","score":0.97}]}
/// {"hands":[]}
/// ```
pub struct ReplayDetector {
    frames: Vec<DetectionResult>,
    cursor: usize,
}

impl ReplayDetector {
    pub fn open(path: &Path) -> Result<Self, StartupError> {
        let contents = fs::read_to_string(path)
            .map_err(|err| StartupError::Detector(format!("{}: {err}", path.display())))?;
        let detector = Self::parse(&contents)?;
        info!(path = %path.display(), frames = detector.len(), "replay loaded");
        Ok(detector)
    }

    pub fn parse(contents: &str) -> Result<Self, StartupError> {
        let mut frames = Vec::new();
        for (number, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record: FrameRecord = serde_json::from_str(line)
                .map_err(|err| StartupError::Detector(format!("line {}: {err}", number + 1)))?;
            frames.push(DetectionResult::from_raw(record.hands));
        }

        if frames.is_empty() {
            return Err(StartupError::Detector("recording has no frames".to_string()));
        }
        Ok(Self { frames, cursor: 0 })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl HandDetector for ReplayDetector {
    fn detect(&mut self, _timestamp: Duration) -> DetectionResult {
        let frame = self.frames[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.frames.len();
        frame
    }
}

/*
Demo Performer
==============

A scripted pair of hands so the instrument can be heard without a tracker:

    pitch hand    (x 0.25)  opens and closes every 4 s, walking the scale
    volume hand   (x 0.75)  rises and falls every 6 s
                            pinches for 1.5 s out of every 8 s
                            steps out of view for 2 s out of every 16 s
                            (one-handed fallback volume)
*/

const PITCH_PERIOD: f32 = 4.0;
const VOLUME_PERIOD: f32 = 6.0;
const PINCH_PERIOD: f32 = 8.0;
const PINCH_WINDOW: (f32, f32) = (5.0, 6.5);
const ABSENCE_PERIOD: f32 = 16.0;
const ABSENCE_START: f32 = 14.0;

#[derive(Debug, Default)]
pub struct SweepDetector;

impl SweepDetector {
    pub fn new() -> Self {
        Self
    }
}

impl HandDetector for SweepDetector {
    fn detect(&mut self, timestamp: Duration) -> DetectionResult {
        let t = timestamp.as_secs_f32();

        // 0.04 .. 0.42 covers fist to fully open with some saturation at both ends.
        let reach = 0.23 + 0.19 * (TAU * t / PITCH_PERIOD).sin();
        let pitch = HandPose::new(0.25, 0.6, reach)
            .to_hand()
            .with_handedness(Handedness::Left, 0.95);

        let mut hands = vec![pitch];

        if t % ABSENCE_PERIOD < ABSENCE_START {
            let height = 0.55 + 0.3 * (TAU * t / VOLUME_PERIOD).sin();
            let mut pose = HandPose::new(0.75, height, 0.2);
            let phase = t % PINCH_PERIOD;
            if phase >= PINCH_WINDOW.0 && phase < PINCH_WINDOW.1 {
                pose = pose.pinched(0.02);
            }
            hands.push(pose.to_hand().with_handedness(Handedness::Right, 0.95));
        }

        DetectionResult::new(hands)
    }
}

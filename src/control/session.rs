use std::ops::ControlFlow;
use std::time::Duration;

use tracing::debug;

use super::{
    collaborators::{AudioChain, HandDetector},
    engine::{ControlLoop, FrameOutput},
    scheduler::FrameScheduler,
};
use crate::{config::HandsynthConfig, error::StartupError};

/// A detector and a control loop bound together, ready to be scheduled.
///
/// Startup is ordered: the audio chain must be ready before the session can
/// be built at all; the detector may still be loading, in which case frames
/// are skipped until it reports ready.
pub struct Session<D: HandDetector, C: AudioChain> {
    detector: D,
    control: ControlLoop<C>,
    waiting: bool,
}

impl<D: HandDetector, C: AudioChain> Session<D, C> {
    pub fn start(detector: D, chain: C, config: &HandsynthConfig) -> Result<Self, StartupError> {
        let control = ControlLoop::new(chain, config)?;
        Ok(Self {
            detector,
            control,
            waiting: false,
        })
    }

    pub fn is_ready(&self) -> bool {
        self.detector.is_ready() && self.control.chain().is_ready()
    }

    /// Detect and process one frame. `None` while a collaborator is not ready.
    pub fn tick(&mut self, timestamp: Duration) -> Option<FrameOutput> {
        if !self.is_ready() {
            if !self.waiting {
                debug!("collaborators not ready, skipping frames");
                self.waiting = true;
            }
            return None;
        }
        self.waiting = false;

        let detection = self.detector.detect(timestamp);
        Some(self.control.process_frame(&detection))
    }

    /// Drive `tick` from `scheduler` until `on_frame` breaks.
    ///
    /// `on_frame` also sees skipped frames (`None`) so the caller can keep
    /// its own loop alive, e.g. to poll for a quit key.
    pub fn run<F>(&mut self, scheduler: &mut dyn FrameScheduler, mut on_frame: F)
    where
        F: FnMut(Option<&FrameOutput>, &mut ControlLoop<C>) -> ControlFlow<()>,
    {
        scheduler.run(&mut |timestamp| {
            let output = self.tick(timestamp);
            on_frame(output.as_ref(), &mut self.control)
        });
    }

    pub fn control(&self) -> &ControlLoop<C> {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut ControlLoop<C> {
        &mut self.control
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }
}

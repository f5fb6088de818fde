use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};

/*
Frame Scheduling
================

"Run this step at the display cadence until it says stop." The step gets the
time since the run began and answers `Continue` or `Break`. Calls never
overlap: the next one starts only after the previous returned.

    FixedRateScheduler   wall clock, sleeps to hold the rate, skips ahead
                         instead of bursting when a frame runs late
    SteppedScheduler     no sleeping, synthetic timestamps; offline runs and
                         tests
*/

pub trait FrameScheduler {
    fn run(&mut self, step: &mut dyn FnMut(Duration) -> ControlFlow<()>);
}

pub struct FixedRateScheduler {
    period: Duration,
}

impl FixedRateScheduler {
    /// `fps` is clamped to at least 1.
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / fps.max(1),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn run(&mut self, step: &mut dyn FnMut(Duration) -> ControlFlow<()>) {
        let start = Instant::now();
        let mut deadline = start;

        loop {
            if step(start.elapsed()).is_break() {
                return;
            }

            deadline += self.period;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                // Late: drop the missed ticks rather than catching up.
                deadline = now;
            }
        }
    }
}

/// Runs a fixed number of frames back to back with evenly spaced timestamps.
pub struct SteppedScheduler {
    period: Duration,
    frames: u64,
}

impl SteppedScheduler {
    pub fn new(fps: u32, frames: u64) -> Self {
        Self {
            period: Duration::from_secs(1) / fps.max(1),
            frames,
        }
    }
}

impl FrameScheduler for SteppedScheduler {
    fn run(&mut self, step: &mut dyn FnMut(Duration) -> ControlFlow<()>) {
        for frame in 0..self.frames {
            let timestamp = self.period * frame as u32;
            if step(timestamp).is_break() {
                return;
            }
        }
    }
}

/*
Exponential Parameter Smoothing
===============================

Jumping a parameter from one value to another between two samples puts a
step into the signal, which is heard as a click (gain, cutoff) or a zipper
(frequency). Instead every parameter chases its target exponentially:

    v(t) = target + (v(t0) - target) · e^(-(t - t0) / τ)

τ is the time constant: after τ seconds 63% of the gap is closed, after 3τ
95%, after 5τ 99%.

  value
  target ┤          ___________________
         │      .--'
         │    /        ← never overshoots, never quite arrives
         │  /
  start  ┼-'
         └──┬──────┬──────┬──────┬────→ t
            t0    +τ    +2τ    +3τ

Per sample, the same curve is one multiply-add with a fixed coefficient:

    c = e^(-1 / (τ · fs))
    v[n+1] = target + (v[n] - target) · c

Since 0 ≤ c < 1 the distance to the target shrinks every sample and keeps its
sign, so the approach is monotonic with no overshoot. τ ≤ 0 gives c = 0: the
value jumps.

A target carries the sample at which it takes effect. Until then the
previous target keeps being chased. A newer pending target replaces an older
one that has not started yet.
*/

/// Per-sample decay coefficient for a time constant in seconds.
#[inline]
pub fn time_constant_coefficient(time_constant: f32, sample_rate: f32) -> f32 {
    if !(time_constant > 0.0) || !time_constant.is_finite() || sample_rate <= 0.0 {
        return 0.0;
    }
    (-1.0 / (time_constant * sample_rate)).exp()
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingTarget {
    target: f32,
    start_sample: u64,
    coefficient: f32,
}

/// A control value that approaches its target exponentially on the audio clock.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedParam {
    value: f32,
    target: f32,
    coefficient: f32,
    pending: Option<PendingTarget>,
}

impl SmoothedParam {
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            target: initial,
            coefficient: 0.0,
            pending: None,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// The target currently being chased (a pending one is not counted).
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Start chasing `target` from `start_sample` with time constant `time_constant` seconds.
    ///
    /// Non-finite targets are ignored.
    pub fn set_target_at(&mut self, target: f32, start_sample: u64, time_constant: f32, sample_rate: f32) {
        if !target.is_finite() {
            return;
        }
        self.pending = Some(PendingTarget {
            target,
            start_sample,
            coefficient: time_constant_coefficient(time_constant, sample_rate),
        });
    }

    /// Jump straight to `value`, dropping anything pending.
    pub fn set_immediate(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.coefficient = 0.0;
        self.pending = None;
    }

    /// Advance to `sample_index` and return the new value.
    #[inline]
    pub fn next(&mut self, sample_index: u64) -> f32 {
        if let Some(pending) = self.pending {
            if sample_index >= pending.start_sample {
                self.target = pending.target;
                self.coefficient = pending.coefficient;
                self.pending = None;
            }
        }

        self.value = self.target + (self.value - self.target) * self.coefficient;
        self.value
    }

    pub fn is_settled(&self, tolerance: f32) -> bool {
        self.pending.is_none() && (self.value - self.target).abs() <= tolerance
    }
}

//! One control frame: classify, map, smooth, push.

use std::hint::black_box;

use criterion::Criterion;
use handsynth::config::HandsynthConfig;
use handsynth::control::{AudioChain, ControlLoop};
use handsynth::dsp::Waveform;
use handsynth::landmarks::{DetectionResult, HandPose};
use handsynth::synth::SynthParam;

/// Swallows every push; isolates the control path from the queue.
struct NullChain;

impl AudioChain for NullChain {
    fn current_time(&self) -> f64 {
        0.0
    }

    fn set_target_at_time(&mut self, _: SynthParam, target: f32, _: f64, _: f32) {
        black_box(target);
    }

    fn frequency(&self) -> f32 {
        440.0
    }

    fn set_waveform(&mut self, _: Waveform) {}
}

pub fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/frame");
    let mut control = ControlLoop::new(NullChain, &HandsynthConfig::default()).unwrap();

    let two_hands = DetectionResult::new(vec![
        HandPose::new(0.25, 0.6, 0.3).to_hand(),
        HandPose::new(0.75, 0.3, 0.2).pinched(0.02).to_hand(),
    ]);
    group.bench_function("two_hands", |b| {
        b.iter(|| black_box(control.process_frame(black_box(&two_hands))))
    });

    let empty = DetectionResult::empty();
    group.bench_function("no_hands", |b| {
        b.iter(|| black_box(control.process_frame(black_box(&empty))))
    });

    group.finish();
}

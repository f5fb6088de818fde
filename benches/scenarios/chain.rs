//! Full oscillator → filter → gain render, as called from the audio callback.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use handsynth::control::{AudioChain, ControlLoop};
use handsynth::config::HandsynthConfig;
use handsynth::landmarks::{DetectionResult, HandPose};
use handsynth::synth::{build_chain, PARAM_QUEUE_CAPACITY};

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/chain");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Playing with the wah engaged: every parameter is moving
        let (handle, mut chain) = build_chain(SAMPLE_RATE, PARAM_QUEUE_CAPACITY);
        let mut control = ControlLoop::new(handle, &HandsynthConfig::default()).unwrap();
        let hands = DetectionResult::new(vec![
            HandPose::new(0.25, 0.6, 0.3).to_hand(),
            HandPose::new(0.75, 0.3, 0.2).pinched(0.02).to_hand(),
        ]);

        group.bench_with_input(BenchmarkId::new("wah", size), &size, |b, _| {
            b.iter(|| {
                control.process_frame(&hands);
                chain.render(black_box(&mut buffer));
            })
        });

        black_box(control.chain().current_time());
    }

    group.finish();
}

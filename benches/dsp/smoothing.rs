//! Benchmarks for per-sample parameter smoothing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use handsynth::dsp::smoothing::SmoothedParam;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/smoothing");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Chasing a target the whole block (the common case mid-gesture)
        let mut param = SmoothedParam::new(220.0);
        let mut n = 0u64;
        group.bench_with_input(BenchmarkId::new("gliding", size), &size, |b, _| {
            b.iter(|| {
                param.set_target_at(black_box(880.0), n, 0.01, SAMPLE_RATE);
                for out in buffer.iter_mut() {
                    *out = param.next(n);
                    n += 1;
                }
            })
        });
    }

    group.finish();
}

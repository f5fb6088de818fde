//! Benchmarks for the state-variable lowpass at both wah presets.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use handsynth::dsp::filter::SVFilter;
use handsynth::mapping::FilterPreset;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp, rich in harmonics
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut buffer = input.clone();

        for (name, preset) in [("vocal", FilterPreset::VOCAL), ("transparent", FilterPreset::TRANSPARENT)] {
            let mut filter = SVFilter::new();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (out, &x) in buffer.iter_mut().zip(&input) {
                        *out = filter.lowpass(black_box(x), preset.cutoff_hz, preset.q, SAMPLE_RATE);
                    }
                })
            });
        }
    }

    group.finish();
}

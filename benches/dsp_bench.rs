//! Benchmarks for the audio chain and the per-frame control path.
//!
//! Run with: cargo bench
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! A control frame at 60fps has 16.7ms, but it shares that with tracking and
//! drawing, so it should stay in the microseconds.
//!
//! Benchmark groups:
//!   - dsp/*        Primitives (oscillator, filter, smoothing)
//!   - scenarios/*  Full chain render and one control frame

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

pub const SAMPLE_RATE: f32 = 48_000.0;

criterion_group!(
    benches,
    dsp::bench_oscillator,
    dsp::bench_filter,
    dsp::bench_smoothing,
    scenarios::bench_chain,
    scenarios::bench_frame,
);
criterion_main!(benches);

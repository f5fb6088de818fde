//! Benchmarks for low-level DSP primitives.

mod filter;
mod oscillator;
mod smoothing;

pub use filter::bench_filter;
pub use oscillator::bench_oscillator;
pub use smoothing::bench_smoothing;

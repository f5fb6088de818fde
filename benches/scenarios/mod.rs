//! Real-world scenario benchmarks: the chain as the audio callback runs it,
//! and the control loop as the frame scheduler runs it.

mod chain;
mod frame;

pub use chain::bench_chain;
pub use frame::bench_frame;

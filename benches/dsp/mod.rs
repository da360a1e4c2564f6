//! Benchmarks for low-level DSP primitives.

mod convolution;
mod delay;
mod distortion;

pub use convolution::bench_convolution;
pub use delay::bench_delay;
pub use distortion::bench_distortion;

//! Benchmarks for DSP primitives and engine scenarios.
//!
//! Run with: cargo bench
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 128 samples = 2.67ms deadline
//!   - 256 samples = 5.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - dsp/*        Low-level primitives (saturation, echo, convolution)
//!   - scenarios/*  Voices, harmony helpers, bar generation, the effects bus
//!                  and the full render path

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    // Low-level DSP primitives
    dsp::bench_distortion,
    dsp::bench_delay,
    dsp::bench_convolution,
    // Engine scenarios
    scenarios::bench_voices,
    scenarios::bench_harmony,
    scenarios::bench_composer,
    scenarios::bench_bus,
    scenarios::bench_render,
);
criterion_main!(benches);

//! Benchmarks for the full render path: voice rack plus effects bus, with
//! the scheduler keeping voices coming.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use lofi_engine::compose::Composer;
use lofi_engine::engine::Scheduler;
use lofi_engine::io::OfflineOutput;
use lofi_engine::synth::Synthesizer;
use lofi_engine::EngineConfig;

use crate::BLOCK_SIZES;

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        let config = EngineConfig::default();
        let (mut output, mut port) = OfflineOutput::new(&config, sample_rate);
        port.controls.set_muted(false);

        let mut composer = Composer::new(42);
        let mut scheduler = Scheduler::new(config.lookahead_seconds);
        let synth = Synthesizer::new(sample_rate);
        scheduler.reset(0.0);

        group.bench_with_input(BenchmarkId::new("playing", size), &size, |b, &size| {
            b.iter(|| {
                scheduler.tick(port.clock.now(), &mut composer, &synth, &mut port.voices);
                port.collect_retired();
                black_box(output.render(size))
            })
        });
    }

    group.finish();
}

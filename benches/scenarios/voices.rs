//! Benchmarks for complete instrument voices.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use lofi_engine::dsp::{Adsr, Waveform};
use lofi_engine::graph::node::{GraphNode, RenderCtx};
use lofi_engine::voices;

use crate::BLOCK_SIZES;

fn bench_voice(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    name: &str,
    mut voice: impl GraphNode,
    frequency: f32,
    size: usize,
) {
    let ctx = RenderCtx::from_freq(48_000.0, frequency, 0.8);
    let mut buffer = vec![0.0f32; size];
    voice.note_on(&ctx);
    group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
        b.iter(|| {
            voice.render_block(black_box(&mut buffer), black_box(&ctx));
        })
    });
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let shape = Adsr::new(0.01, 0.3, 0.7, 0.5);

    for &size in BLOCK_SIZES {
        // Pitched instruments at typical registers
        bench_voice(&mut group, "pad", voices::pad(shape), 220.0, size);
        bench_voice(&mut group, "bass", voices::bass(shape), 55.0, size);
        bench_voice(&mut group, "epiano", voices::epiano(shape), 330.0, size);
        bench_voice(&mut group, "lead", voices::lead(shape, Waveform::Triangle), 523.0, size);
        bench_voice(&mut group, "flute", voices::flute(shape), 660.0, size);
        bench_voice(&mut group, "arp", voices::arp(shape, Waveform::Triangle), 440.0, size);
        bench_voice(&mut group, "atmosphere", voices::atmosphere(shape), 110.0, size);

        // Drums ignore the pitch
        bench_voice(&mut group, "kick", voices::kick(), 0.0, size);
        bench_voice(&mut group, "snare", voices::snare(), 0.0, size);
        bench_voice(&mut group, "hihat", voices::hihat(), 0.0, size);
    }

    group.finish();
}

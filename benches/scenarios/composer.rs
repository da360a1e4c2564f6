//! Benchmarks for bar generation.
//!
//! Runs on the scheduler thread once per bar, so it only has to beat the
//! lookahead, but it allocates and should stay cheap.

use std::hint::black_box;

use criterion::Criterion;
use lofi_engine::compose::Composer;

pub fn bench_composer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/composer");

    let mut composer = Composer::new(42);
    group.bench_function("next_bar", |b| {
        b.iter(|| black_box(composer.generate_next_bar()))
    });

    let mut composer = Composer::new(42);
    group.bench_function("new_patterns", |b| {
        b.iter(|| black_box(composer.generate_new_patterns().bpm))
    });

    group.finish();
}

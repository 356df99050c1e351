//! Draw-path benchmarks.
//!
//! The draw methods sit inside per-particle inner loops, so the numbers of
//! interest are single-draw latency and the cost of the construct-and-draw
//! pattern used for per-(entity, step) streams.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use saru_rng::{philox4x32, Saru};

fn bench_permutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("saru/philox");
    group.throughput(Throughput::Elements(1));

    group.bench_function("permute", |b| {
        let mut i = 0u32;
        b.iter(|| {
            i = i.wrapping_add(1);
            black_box(philox4x32([i, 0, 0, 0], [42, 7]))
        });
    });

    group.finish();
}

fn bench_draws(c: &mut Criterion) {
    let mut group = c.benchmark_group("saru/draw");
    group.throughput(Throughput::Elements(1));

    group.bench_function("u32", |b| {
        let mut rng = Saru::new(42, 0, 1, 2, 3);
        b.iter(|| black_box(rng.u32()));
    });

    group.bench_function("f", |b| {
        let mut rng = Saru::new(42, 0, 1, 2, 3);
        b.iter(|| black_box(rng.f()));
    });

    group.bench_function("d", |b| {
        let mut rng = Saru::new(42, 0, 1, 2, 3);
        b.iter(|| black_box(rng.d()));
    });

    group.bench_function("normal_f32", |b| {
        let mut rng = Saru::new(42, 0, 1, 2, 3);
        b.iter(|| black_box(rng.normal::<f32>()));
    });

    group.bench_function("normal_f64", |b| {
        let mut rng = Saru::new(42, 0, 1, 2, 3);
        b.iter(|| black_box(rng.normal::<f64>()));
    });

    group.bench_function("normal_pair_f64", |b| {
        let mut rng = Saru::new(42, 0, 1, 2, 3);
        b.iter(|| black_box(rng.normal_pair::<f64>()));
    });

    group.finish();
}

fn bench_stream_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("saru/stream");
    group.throughput(Throughput::Elements(1));

    // The dominant pattern in a simulation step: build the (entity, step)
    // stream from indices and take one draw.
    group.bench_function("construct_and_draw", |b| {
        let mut entity = 0u32;
        b.iter(|| {
            entity = entity.wrapping_add(1);
            let mut rng = Saru::new(42, 0, entity, 1000, 1);
            black_box(rng.normal::<f64>())
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_permutation,
    bench_draws,
    bench_stream_construction
);
criterion_main!(benches);

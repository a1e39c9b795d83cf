//! Threefry mixing and engine throughput benchmarks.

use std::hint::black_box;

use cbrng::{
    BlockMixer, DefaultEngine, Threefry2x32, Threefry2x32Engine, Threefry2x32R13, Threefry2x64,
    Threefry4x32, Threefry4x64, Threefry4x64Engine, Threefry4x64R13,
};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use rand::RngCore;

// ============================================================================
// Block Mixing
// ============================================================================

fn bench_mix<M: BlockMixer<N>, const N: usize>(c: &mut Criterion, name: &str, mixer: M) {
    let mut group = c.benchmark_group("mix");
    group.throughput(Throughput::Bytes((N * std::mem::size_of::<M::Word>()) as u64));

    let counter = mixer.key();
    group.bench_function(name, |b| {
        b.iter(|| black_box(mixer.mix(black_box(&counter))));
    });

    group.finish();
}

fn bench_mixers(c: &mut Criterion) {
    bench_mix(c, "threefry2x32", Threefry2x32::with_key([1, 2]));
    bench_mix(c, "threefry2x32r13", Threefry2x32R13::with_key([1, 2]));
    bench_mix(c, "threefry4x32", Threefry4x32::with_key([1, 2, 3, 4]));
    bench_mix(c, "threefry2x64", Threefry2x64::with_key([1, 2]));
    bench_mix(c, "threefry4x64", Threefry4x64::with_key([1, 2, 3, 4]));
    bench_mix(c, "threefry4x64r13", Threefry4x64R13::with_key([1, 2, 3, 4]));
}

// ============================================================================
// Engine Streams
// ============================================================================

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    group.throughput(Throughput::Bytes(4));
    group.bench_function("threefry2x32", |b| {
        let mut engine = Threefry2x32Engine::from_scalar(42);
        b.iter(|| black_box(engine.generate()));
    });

    group.throughput(Throughput::Bytes(8));
    group.bench_function("threefry4x64", |b| {
        let mut engine = Threefry4x64Engine::from_scalar(42);
        b.iter(|| black_box(engine.generate()));
    });

    group.finish();
}

fn bench_fill_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_bytes");
    let mut buf = vec![0u8; 16384];
    group.throughput(Throughput::Bytes(buf.len() as u64));

    group.bench_function("default_engine_16kb", |b| {
        let mut engine = DefaultEngine::from_scalar(42);
        b.iter(|| {
            engine.fill_bytes(&mut buf);
            black_box(&buf);
        });
    });

    group.finish();
}

fn bench_skip_and_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream_control");

    group.bench_function("skip_2_pow_64", |b| {
        let mut engine = DefaultEngine::from_scalar(42);
        b.iter(|| engine.skip(black_box(1u128 << 64)));
    });

    group.bench_function("derivate", |b| {
        let engine = DefaultEngine::from_scalar(42);
        let mut key = 0u64;
        b.iter(|| {
            key = key.wrapping_add(1);
            black_box(engine.derivate_scalar(key))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mixers,
    bench_generate,
    bench_fill_bytes,
    bench_skip_and_derive
);
criterion_main!(benches);

//! Criterion benchmarks for the resona-core hot paths
//!
//! Run with: cargo bench -p resona-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use resona_core::{ParamId, ParamSpec, ParamState, RampedValue};

const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn bench_ramp(c: &mut Criterion) {
    let mut group = c.benchmark_group("RampedValue");

    for &block_size in BLOCK_SIZES {
        group.bench_with_input(
            BenchmarkId::new("advance_ramping", block_size),
            &block_size,
            |b, &size| {
                let mut ramp = RampedValue::new(0.0);
                let mut target = 1.0;
                b.iter(|| {
                    ramp.set_target(target, size as u32);
                    for _ in 0..size {
                        black_box(ramp.advance());
                    }
                    target = 1.0 - target;
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("advance_settled", block_size),
            &block_size,
            |b, &size| {
                let mut ramp = RampedValue::new(0.5);
                b.iter(|| {
                    for _ in 0..size {
                        black_box(ramp.advance());
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("Transform");

    let linear = ParamSpec::linear(ParamId(0), "Frequency", "Freq", 20.0, 15000.0, 500.0);
    let log = ParamSpec::log(ParamId(0), "Frequency", "Freq", 20.0, 15000.0, 500.0);
    let discrete = ParamSpec::discrete(ParamId(0), "Order", "Order", 1, 200, 20);

    for (name, spec) in [("linear", linear), ("log", log), ("discrete", discrete)] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(spec.to_scaled(black_box(0.37))));
        });
    }

    group.finish();
}

fn bench_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("ParamState");

    for &count in &[8usize, 64, 256] {
        let state = ParamState::from_parts(0, false, vec![0.5; count]);
        let bytes = state.encode();

        group.bench_with_input(BenchmarkId::new("encode", count), &count, |b, _| {
            b.iter(|| black_box(state.encode()));
        });
        group.bench_with_input(BenchmarkId::new("decode", count), &count, |b, &n| {
            b.iter(|| black_box(ParamState::decode(black_box(&bytes), n)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ramp, bench_transform, bench_state);

criterion_main!(benches);

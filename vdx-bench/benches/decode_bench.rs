//! Binary payload decoding benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vdx_data::{DataTypeRegistry, GenericDataMatrix, Hypocenter, HypocenterList, Wave};

fn wave_binary(samples: usize) -> Vec<u8> {
    Wave::new(1_191_189_600.0, 100.0, (0..samples as i32).collect()).to_binary()
}

fn matrix_binary(rows: usize) -> Vec<u8> {
    let values: Vec<f64> = (0..rows * 4).map(|i| i as f64 * 0.25).collect();
    GenericDataMatrix::new(rows, 4, values).unwrap().to_binary()
}

fn hypocenter_binary(events: usize) -> Vec<u8> {
    let events: Vec<Hypocenter> = (0..events)
        .map(|i| Hypocenter {
            time: 1_191_189_600.0 + i as f64,
            lat: 19.4,
            lon: -155.3,
            depth: 2.5,
            magnitude: 1.8,
        })
        .collect();
    HypocenterList::new(events).to_binary()
}

fn bench_wave_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("wave_decode");

    for samples in [100, 1000, 10000] {
        let encoded = wave_binary(samples);

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(samples),
            &encoded,
            |b, encoded| {
                b.iter(|| black_box(Wave::from_binary(encoded).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_matrix_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_decode");

    for rows in [100, 1000, 10000] {
        let encoded = matrix_binary(rows);

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &encoded, |b, encoded| {
            b.iter(|| black_box(GenericDataMatrix::from_binary(encoded).unwrap()));
        });
    }

    group.finish();
}

fn bench_hypocenter_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("hypocenter_decode");

    for events in [100, 1000, 10000] {
        let encoded = hypocenter_binary(events);

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(events),
            &encoded,
            |b, encoded| {
                b.iter(|| black_box(HypocenterList::from_binary(encoded).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_registry_dispatch(c: &mut Criterion) {
    let registry = DataTypeRegistry::with_builtin_types();
    let mut group = c.benchmark_group("registry_dispatch");

    for samples in [100, 1000, 10000] {
        let encoded = wave_binary(samples);

        group.throughput(Throughput::Bytes(encoded.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(samples),
            &encoded,
            |b, encoded| {
                b.iter(|| black_box(registry.decode("wave", encoded).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_wave_decode,
    bench_matrix_decode,
    bench_hypocenter_decode,
    bench_registry_dispatch,
);

criterion_main!(benches);

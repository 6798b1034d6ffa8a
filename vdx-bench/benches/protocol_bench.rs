//! Wire protocol benchmarks: command text and payload compression.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vdx_data::Wave;
use vdx_protocol::{compress, decompress, Command, ResponseEnvelope};

fn create_test_command(pairs: usize) -> Command {
    let mut command = Command::new()
        .with("source", "hvo_def_tilt")
        .with("action", "data")
        .with("st", "1191189600000")
        .with("et", "1191276000000");
    for i in command.len()..pairs {
        command.set(format!("param{}", i), format!("value{}", i));
    }
    command
}

fn create_test_payload(samples: usize) -> Vec<u8> {
    let wave = Wave::new(1_191_189_600.0, 100.0, (0..samples as i32).collect());
    wave.to_binary()
}

fn bench_command_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("command_serialize");

    for pairs in [4, 16, 64] {
        let command = create_test_command(pairs);

        group.throughput(Throughput::Elements(pairs as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pairs), &command, |b, command| {
            b.iter(|| black_box(command.request_line()));
        });
    }

    group.finish();
}

fn bench_command_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("command_parse");

    for pairs in [4, 16, 64] {
        let serialized = create_test_command(pairs).serialize();

        group.throughput(Throughput::Elements(pairs as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(pairs),
            &serialized,
            |b, serialized| {
                b.iter(|| black_box(Command::parse(serialized)));
            },
        );
    }

    group.finish();
}

fn bench_envelope_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope_parse");
    group.throughput(Throughput::Elements(1));

    let lines = [
        ("ok_binary", "ok: bytes=81920;type=wave"),
        ("ok_text", "ok: lines=500"),
        ("error", "error: no data for selection"),
    ];
    for (name, line) in lines {
        group.bench_with_input(BenchmarkId::from_parameter(name), &line, |b, line| {
            b.iter(|| black_box(ResponseEnvelope::parse(line).unwrap()));
        });
    }

    group.finish();
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for samples in [100, 1000, 10000] {
        let payload = create_test_payload(samples);

        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(samples),
            &payload,
            |b, payload| {
                b.iter(|| black_box(compress(payload).unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");

    for samples in [100, 1000, 10000] {
        let payload = create_test_payload(samples);
        let compressed = compress(&payload).unwrap();

        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(samples),
            &compressed,
            |b, compressed| {
                b.iter(|| black_box(decompress(compressed).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_command_serialize,
    bench_command_parse,
    bench_envelope_parse,
    bench_compress,
    bench_decompress,
);

criterion_main!(benches);

//! DNS message parsing benchmarks.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use skua_proto::Message;

/// A single-answer A-record response.
fn small_response() -> Vec<u8> {
    let mut wire = vec![
        0x00, 0x2A, 0x81, 0x80, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    ];
    wire.extend_from_slice(&[
        0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00,
    ]);
    wire.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    wire.extend_from_slice(&[0xC0, 0x0C]); // compressed owner
    wire.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    wire.extend_from_slice(&[0x00, 0x00, 0x01, 0x2C, 0x00, 0x04]);
    wire.extend_from_slice(&[93, 184, 216, 34]);
    wire
}

/// A response with eight compressed answers and an OPT record.
fn large_response() -> Vec<u8> {
    let mut wire = vec![
        0x00, 0x2A, 0x81, 0x80, 0x00, 0x01, 0x00, 0x08, 0x00, 0x00, 0x00, 0x01,
    ];
    wire.extend_from_slice(&[
        0x07, b'e', b'x', b'a', b'm', b'p', b'l', b'e', 0x03, b'c', b'o', b'm', 0x00,
    ]);
    wire.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    for i in 0..8u8 {
        wire.extend_from_slice(&[0xC0, 0x0C]);
        wire.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
        wire.extend_from_slice(&[0x00, 0x00, 0x01, 0x2C, 0x00, 0x04]);
        wire.extend_from_slice(&[192, 0, 2, i]);
    }
    // OPT with an NSID option.
    wire.extend_from_slice(&[0x00, 0x00, 0x29, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00]);
    wire.extend_from_slice(&[0x00, 0x08, 0x00, 0x03, 0x00, 0x04, b'b', b'e', b'n', b'c']);
    wire
}

fn parsing_benchmarks(c: &mut Criterion) {
    let small = small_response();
    let large = large_response();

    let mut group = c.benchmark_group("parse");

    group.throughput(Throughput::Bytes(small.len() as u64));
    group.bench_function("small_response", |b| {
        b.iter(|| Message::parse(black_box(&small)).unwrap())
    });

    group.throughput(Throughput::Bytes(large.len() as u64));
    group.bench_function("large_response", |b| {
        b.iter(|| Message::parse(black_box(&large)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, parsing_benchmarks);
criterion_main!(benches);

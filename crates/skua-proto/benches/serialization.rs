//! DNS message serialization benchmarks.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use skua_proto::{Message, Name, Question, ResourceRecord};
use std::net::Ipv4Addr;
use std::str::FromStr;

fn serialization_benchmarks(c: &mut Criterion) {
    let name = Name::from_str("www.example.com").unwrap();

    let query = Message::query_with_edns(Question::a(name.clone()));

    let mut response = Message::query(Question::a(name.clone()));
    response.header_mut().set_response(true);
    for i in 0..8u8 {
        response.add_answer(ResourceRecord::a(
            name.clone(),
            300,
            Ipv4Addr::new(192, 0, 2, i),
        ));
    }

    let mut group = c.benchmark_group("serialize");

    group.bench_function("query_with_edns", |b| {
        b.iter(|| black_box(&query).to_wire())
    });

    group.bench_function("response_8_answers", |b| {
        b.iter(|| black_box(&response).to_wire())
    });

    group.finish();
}

criterion_group!(benches, serialization_benchmarks);
criterion_main!(benches);

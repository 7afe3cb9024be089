// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![expect(missing_docs, reason = "Benchmark code")]

//! Benchmarks for parsing, formatting, and the JSON hooks of `FixedTimestamp`.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use fixed_stamp::FixedTimestamp;
use jiff::Timestamp;

const TEXT: &str = "2017-07-16T07:10:20+00:00";
const JSON: &[u8] = br#""2017-07-16T07:10:20+09:00""#;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_stamp");
    let now = FixedTimestamp::from(Timestamp::now());

    group.bench_function("parse", |b| {
        b.iter(|| FixedTimestamp::parse(black_box(TEXT)));
    });

    group.bench_function("to_string", |b| {
        b.iter(|| black_box(now).to_string());
    });

    group.bench_function("to_json", |b| {
        b.iter(|| black_box(now).to_json());
    });

    group.bench_function("from_json", |b| {
        let mut target = FixedTimestamp::UNIX_EPOCH;
        b.iter(|| target.assign_from_json(black_box(JSON)));
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);

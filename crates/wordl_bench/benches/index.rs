//! Full-text index and query benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wordl_bench::{category_words, populated_index};
use wordl_core::{FtsIndex, Record, RecordId, SearchQuery, TokenizerConfig};

/// Benchmark indexing records.
fn bench_index_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_fields");

    for count in [100, 1_000, 10_000] {
        let records = category_words(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, records| {
            b.iter(|| {
                let mut index = FtsIndex::default();
                for (i, record) in records.iter().enumerate() {
                    index.index_fields(RecordId::new(i as i64 + 1), &record.search_fields());
                }
                black_box(index.record_count());
            });
        });
    }

    group.finish();
}

/// Benchmark reindexing a single record in a populated index.
fn bench_reindex(c: &mut Criterion) {
    let mut index = populated_index(10_000);
    let record = category_words(1).remove(0);
    let fields = record.search_fields();

    c.bench_function("reindex_one_of_10000", |b| {
        b.iter(|| index.index_fields(black_box(RecordId::new(42)), black_box(&fields)));
    });
}

/// Benchmark query parsing and evaluation.
fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");
    let tokenizer = TokenizerConfig::default();
    let index = populated_index(10_000);

    let queries = [
        ("term", "animals"),
        ("field", "word:kato"),
        ("prefix", "ka*"),
        ("boolean", "animals AND NOT ka*"),
        ("match_all", "*"),
    ];

    for (name, query) in queries {
        group.bench_function(BenchmarkId::new("parse", name), |b| {
            b.iter(|| SearchQuery::parse(black_box(query), &tokenizer).unwrap());
        });

        let parsed = SearchQuery::parse(query, &tokenizer).unwrap();
        group.bench_function(BenchmarkId::new("evaluate", name), |b| {
            b.iter(|| black_box(parsed.evaluate(&index)).len());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_index_fields, bench_reindex, bench_query);
criterion_main!(benches);

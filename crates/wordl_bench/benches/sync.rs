//! Sync service benchmarks over the in-memory adapters.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tokio::runtime::Runtime;
use wordl_bench::category_words;
use wordl_core::{
    CategoryWord, EntitySyncService, MemoryRecordStore, MemorySearchIndex, SyncConfig,
};

type Service = EntitySyncService<CategoryWord, MemoryRecordStore<CategoryWord>, MemorySearchIndex<CategoryWord>>;

fn service() -> Service {
    EntitySyncService::new(
        MemoryRecordStore::new(),
        MemorySearchIndex::new(),
        SyncConfig::default(),
    )
}

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

/// Benchmark write-through creates.
fn bench_create(c: &mut Criterion) {
    let rt = runtime();
    let svc = service();
    let record = category_words(1).remove(0);

    c.bench_function("create", |b| {
        b.iter(|| {
            rt.block_on(svc.create(black_box(record.clone()))).unwrap();
        });
    });
}

/// Benchmark search over a populated service.
fn bench_search(c: &mut Criterion) {
    let rt = runtime();
    let svc = service();
    rt.block_on(async {
        for record in category_words(5_000) {
            svc.create(record).await.unwrap();
        }
    });

    c.bench_function("search_category_5000", |b| {
        b.iter(|| {
            let hits = rt.block_on(svc.search(black_box("category:animals"))).unwrap();
            black_box(hits.len());
        });
    });
}

criterion_group!(benches, bench_create, bench_search);
criterion_main!(benches);

//! Benchmarks for the Weatherlog query engine and record store
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tempfile::tempdir;
use weatherlog::query::{evaluate, QueryRequest, SortOrder};
use weatherlog::storage::*;

const CITIES: [&str; 5] = ["London", "Moscow", "Paris", "Berlin", "Nashville"];

fn create_test_records(count: usize) -> Vec<WeatherRecord> {
    let base = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
    // Reverse id order so the baseline sort has work to do
    (0..count)
        .rev()
        .map(|i| {
            let date = base + Duration::days((i % 365) as i64);
            NewWeatherRecord::new(date, CITIES[i % CITIES.len()])
                .field("temperature", (i % 40) as f64)
                .with_id(i as u64 + 1)
        })
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    let date = NaiveDate::from_ymd_opt(2019, 6, 11).unwrap();
    let requests = [
        ("all", QueryRequest::new()),
        ("date", QueryRequest::new().date(date)),
        ("cities", QueryRequest::new().cities(["LONDON", "paris"])),
        ("sort_desc", QueryRequest::new().sort(SortOrder::DateDescending)),
        (
            "combined",
            QueryRequest::new()
                .cities(["london", "moscow"])
                .sort(SortOrder::DateAscending),
        ),
    ];

    for size in [1_000, 10_000, 100_000] {
        let records = create_test_records(size);
        group.throughput(Throughput::Elements(size as u64));

        for (name, request) in &requests {
            group.bench_function(format!("{}_{}", name, size), |b| {
                b.iter(|| evaluate(black_box(&records), black_box(request)))
            });
        }
    }

    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let mut group = c.benchmark_group("store");

    group.bench_function("insert_in_memory", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let store = MemoryStore::in_memory();
                let date = NaiveDate::from_ymd_opt(2019, 6, 11).unwrap();

                let start = std::time::Instant::now();

                for _ in 0..iters {
                    store
                        .insert(NewWeatherRecord::new(date, "London"))
                        .await
                        .unwrap();
                }

                start.elapsed()
            })
        });
    });

    group.bench_function("insert_with_snapshot_100", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let mut total = std::time::Duration::ZERO;
                let date = NaiveDate::from_ymd_opt(2019, 6, 11).unwrap();

                for _ in 0..iters {
                    let dir = tempdir().unwrap();
                    let store = MemoryStore::open(&StorageConfig::new(dir.path())).unwrap();

                    let start = std::time::Instant::now();
                    for _ in 0..100 {
                        store
                            .insert(NewWeatherRecord::new(date, "London"))
                            .await
                            .unwrap();
                    }
                    total += start.elapsed();
                }

                total
            })
        });
    });

    group.bench_function("list_all_10000", |b| {
        b.iter_custom(|iters| {
            rt.block_on(async {
                let store = MemoryStore::in_memory();
                let date = NaiveDate::from_ymd_opt(2019, 6, 11).unwrap();
                for i in 0..10_000 {
                    store
                        .insert(NewWeatherRecord::new(date, CITIES[i % CITIES.len()]))
                        .await
                        .unwrap();
                }

                let start = std::time::Instant::now();

                for _ in 0..iters {
                    black_box(store.list_all().await);
                }

                start.elapsed()
            })
        });
    });

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_store);
criterion_main!(benches);

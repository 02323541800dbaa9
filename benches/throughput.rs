//! Throughput Benchmark for tinykv
//!
//! This benchmark measures the store, the codec and the full
//! decode/lock/execute path under various workloads.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;
use std::thread;
use tinykv::{decode, CommandHandler, Store};

/// Benchmark SET operations
fn bench_set(c: &mut Criterion) {
    let mut store = Store::new();

    let mut group = c.benchmark_group("set");
    group.throughput(Throughput::Elements(1));

    group.bench_function("set_small", |b| {
        let mut i = 0u64;
        b.iter(|| {
            store.set(format!("key:{}", i), "small_value").unwrap();
            i += 1;
        });
    });

    group.bench_function("set_overwrite", |b| {
        b.iter(|| {
            store.set("hot_key", "value").unwrap();
        });
    });

    group.finish();
}

/// Benchmark GET operations
fn bench_get(c: &mut Criterion) {
    let mut store = Store::new();

    // Pre-populate with data
    for i in 0..100_000 {
        store.set(format!("key:{}", i), format!("value:{}", i)).unwrap();
    }

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_existing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i % 100_000);
            black_box(store.get(&key));
            i += 1;
        });
    });

    group.bench_function("get_missing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("missing:{}", i);
            black_box(store.get(&key));
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark request decoding
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(1));

    group.bench_function("decode_set", |b| {
        b.iter(|| black_box(decode(black_box(b"set user:1000 some_value\r\n")).unwrap()));
    });

    group.bench_function("decode_padded", |b| {
        b.iter(|| black_box(decode(black_box(b"   GET \t  user:1000   \n")).unwrap()));
    });

    group.finish();
}

/// Benchmark the full request path (80% reads, 20% writes)
fn bench_mixed(c: &mut Criterion) {
    let handler = CommandHandler::new(Store::shared());

    // Pre-populate
    for i in 0..10_000 {
        handler.handle(format!("set key:{} value:{}", i, i).as_bytes()).unwrap();
    }

    let mut group = c.benchmark_group("mixed");
    group.throughput(Throughput::Elements(1));

    group.bench_function("80_read_20_write", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let request = if i % 5 == 0 {
                // 20% writes
                format!("set new:{} value", i)
            } else {
                // 80% reads
                format!("get key:{}", i % 10_000)
            };
            black_box(handler.handle(request.as_bytes()).unwrap());
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark contention on the single store lock
fn bench_contended(c: &mut Criterion) {
    let handler = Arc::new(CommandHandler::new(Store::shared()));

    let mut group = c.benchmark_group("contended");
    group.throughput(Throughput::Elements(4 * 1_000));

    group.bench_function("4_threads_1000_sets", |b| {
        b.iter(|| {
            let workers: Vec<_> = (0..4)
                .map(|t| {
                    let handler = Arc::clone(&handler);
                    thread::spawn(move || {
                        for i in 0..1_000 {
                            let request = format!("set key:{} t{}", i % 64, t);
                            handler.handle(request.as_bytes()).unwrap();
                        }
                    })
                })
                .collect();

            for worker in workers {
                worker.join().unwrap();
            }
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_set,
    bench_get,
    bench_decode,
    bench_mixed,
    bench_contended
);
criterion_main!(benches);

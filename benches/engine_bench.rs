//! Engine benchmarks
//!
//! Measures the dispatch path: durable SET appends and in-memory GETs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

use litedb::store::Value;
use litedb::Engine;

fn bench_set(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let engine = Engine::open_path(dir.path()).unwrap();

    let mut i = 0u64;
    c.bench_function("set (append + fsync)", |b| {
        b.iter(|| {
            i += 1;
            engine
                .set(black_box(&format!("key{}", i % 1024)), Value::Int(i as i64))
                .unwrap();
        })
    });
}

fn bench_get(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let engine = Engine::open_path(dir.path()).unwrap();

    for i in 0..1024u64 {
        engine
            .set(&format!("key{}", i), Value::Str(format!("value{}", i)))
            .unwrap();
    }

    let mut i = 0u64;
    c.bench_function("get (read lock)", |b| {
        b.iter(|| {
            i += 1;
            black_box(engine.get(&format!("key{}", i % 1024)));
        })
    });
}

fn bench_execute_line(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let engine = Engine::open_path(dir.path()).unwrap();
    engine.set("key1", Value::Str("value1".into())).unwrap();

    c.bench_function("execute_line get", |b| {
        b.iter(|| black_box(engine.execute_line(black_box("get key1"))))
    });
}

criterion_group!(benches, bench_set, bench_get, bench_execute_line);
criterion_main!(benches);

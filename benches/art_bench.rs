use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{thread_rng, Rng};

use artree::{AdaptiveRadixTree, ArrayKey};

const TREE_SIZES: [u64; 3] = [1 << 10, 1 << 14, 1 << 18];

fn seq_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("seq_insert");
    group.throughput(Throughput::Elements(1));
    group.bench_function("seq_insert", |b| {
        let mut tree = AdaptiveRadixTree::<ArrayKey<16>, u64>::new();
        let mut key = 0u64;
        b.iter(|| {
            tree.insert(key, key);
            key += 1;
        });
    });
    group.finish();
}

fn rand_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("rand_insert");
    group.throughput(Throughput::Elements(1));
    group.bench_function("rand_insert", |b| {
        let mut tree = AdaptiveRadixTree::<ArrayKey<16>, u64>::new();
        let mut rng = thread_rng();
        b.iter(|| {
            let key: u64 = rng.gen();
            tree.insert(key, key);
        });
    });
    group.finish();
}

fn seq_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("seq_get");
    group.throughput(Throughput::Elements(1));
    for size in TREE_SIZES {
        let mut tree = AdaptiveRadixTree::<ArrayKey<16>, u64>::new();
        for key in 0..size {
            tree.insert(key, key);
        }
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, size| {
            let mut key = 0u64;
            b.iter(|| {
                tree.get(key);
                key = (key + 1) % size;
            });
        });
    }
    group.finish();
}

fn rand_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("rand_get");
    group.throughput(Throughput::Elements(1));
    for size in TREE_SIZES {
        let mut tree = AdaptiveRadixTree::<ArrayKey<16>, u64>::new();
        for key in 0..size {
            tree.insert(key, key);
        }
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, size| {
            let mut rng = thread_rng();
            b.iter(|| tree.get(rng.gen_range(0..*size)));
        });
    }
    group.finish();
}

fn iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    for size in TREE_SIZES {
        let mut tree = AdaptiveRadixTree::<ArrayKey<16>, u64>::new();
        for key in 0..size {
            tree.insert(key, key);
        }
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| tree.iter().count());
        });
    }
    group.finish();
}

fn rand_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("rand_remove");
    group.throughput(Throughput::Elements(1));
    group.bench_function("rand_remove", |b| {
        let mut tree = AdaptiveRadixTree::<ArrayKey<16>, u64>::new();
        let size = 1u64 << 16;
        for key in 0..size {
            tree.insert(key, key);
        }
        let mut rng = thread_rng();
        b.iter(|| {
            let key: u64 = rng.gen_range(0..size);
            if tree.remove(key).is_none() {
                tree.insert(key, key);
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches, seq_insert, rand_insert, seq_get, rand_get, iterate, rand_remove
);
criterion_main!(benches);

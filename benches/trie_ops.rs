//! Benchmarks for trie and classifier operations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seqtrie::{KnnClassifier, Trie};
use std::collections::BTreeMap;

fn generate_word_keys(n: usize) -> Vec<Vec<u8>> {
    // Low-entropy alphabet so keys share long prefixes, the trie's case.
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| {
            let len = rng.gen_range(4..=16);
            (0..len).map(|_| rng.gen_range(b'a'..=b'h')).collect()
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [1_000, 10_000, 100_000] {
        let keys = generate_word_keys(size);

        group.bench_with_input(BenchmarkId::new("Trie", size), &keys, |b, keys| {
            b.iter(|| {
                let mut trie: Trie<u8, u64> = Trie::new();
                for (i, key) in keys.iter().enumerate() {
                    trie.insert(key.iter().copied(), i as u64);
                }
                black_box(trie)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map: BTreeMap<Vec<u8>, u64> = BTreeMap::new();
                for (i, key) in keys.iter().enumerate() {
                    map.insert(key.clone(), i as u64);
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

fn bench_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");

    for size in [1_000, 10_000, 100_000] {
        let keys = generate_word_keys(size);

        let mut trie: Trie<u8, u64> = Trie::new();
        for (i, key) in keys.iter().enumerate() {
            trie.insert(key.iter().copied(), i as u64);
        }

        group.bench_with_input(BenchmarkId::new("Trie", size), &keys, |b, keys| {
            b.iter(|| {
                let mut hits = 0usize;
                for key in keys.iter() {
                    if trie.match_prefix(key.iter().copied()).matched {
                        hits += 1;
                    }
                }
                black_box(hits)
            });
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let features = generate_word_keys(10_000);
    let mut knn: KnnClassifier<u8, u32> = KnnClassifier::new();
    for (i, f) in features.iter().enumerate() {
        knn.learn(f.iter().copied(), (i % 8) as u32);
    }

    group.bench_function("single_best", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for f in features.iter().take(100) {
                if knn.classify(f.iter().copied()).is_some() {
                    hits += 1;
                }
            }
            black_box(hits)
        });
    });

    group.bench_function("k_best_5", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for f in features.iter().take(100) {
                if knn.classify_k(f.iter().copied(), 5).is_some() {
                    hits += 1;
                }
            }
            black_box(hits)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_match, bench_classify);
criterion_main!(benches);

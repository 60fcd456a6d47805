//! Niihau Trie Benchmarks
//!
//! Benchmarks for the trie operations, implemented with the Criterion
//! framework for statistical analysis and regression detection.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use niihau_trie::{NiihauTrie, NiihauTrieConfig};
use std::time::Duration;

const KEY_COUNT: usize = 1000;

/// Generate zero-padded numeric keys of the given length
fn padded_keys(length: usize) -> Vec<String> {
    (0..KEY_COUNT)
        .map(|i| format!("{:0width$}", i, width = length))
        .collect()
}

/// Benchmark the Niihau Trie
fn bench_niihau_trie(c: &mut Criterion) {
    let mut group = c.benchmark_group("niihau_trie");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    // Insert benchmark with different key sizes
    for key_length in [8, 16, 32, 64].iter() {
        group.throughput(Throughput::Elements(KEY_COUNT as u64));
        group.bench_with_input(
            BenchmarkId::new("insert", key_length),
            key_length,
            |b, &length| {
                let keys = padded_keys(length);
                b.iter(|| {
                    let mut trie = NiihauTrie::new();
                    for (i, key) in keys.iter().enumerate() {
                        black_box(trie.insert(key, i));
                    }
                    trie
                });
            },
        );
    }

    // Same workload with reserved child slots
    group.bench_function("insert_reserved_children", |b| {
        let keys = padded_keys(16);
        let config = NiihauTrieConfig::new().with_child_capacity(10);
        b.iter(|| {
            let mut trie = NiihauTrie::with_config(config.clone());
            for (i, key) in keys.iter().enumerate() {
                black_box(trie.insert(key, i));
            }
            trie
        });
    });

    // Lookup benchmark
    group.bench_function("lookup", |b| {
        let keys: Vec<String> = (0..KEY_COUNT).map(|i| format!("key_{}", i)).collect();
        let trie: NiihauTrie<usize> = keys.iter().enumerate().map(|(i, k)| (k, i)).collect();

        let mut index = 0;
        b.iter(|| {
            // Cycle through keys for lookups
            let key = &keys[index % keys.len()];
            index += 1;
            black_box(trie.lookup(key));
        });
    });

    // Lookup of keys that diverge early
    group.bench_function("lookup_miss", |b| {
        let trie: NiihauTrie<usize> = padded_keys(32).into_iter().zip(0..).collect();
        b.iter(|| black_box(trie.contains_key("x0000000000000000000000000000000")));
    });

    // Delete with pruning, rebuilding the trie for every batch
    group.bench_function("delete_all", |b| {
        let keys = padded_keys(16);
        b.iter_batched(
            || -> NiihauTrie<usize> { keys.iter().zip(0..).collect() },
            |mut trie| {
                for key in &keys {
                    black_box(trie.delete(key));
                }
                trie
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// Group all benchmarks together
criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_niihau_trie
}

criterion_main!(benches);

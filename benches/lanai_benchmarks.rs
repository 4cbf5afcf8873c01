//! Lanai Index Benchmarks
//!
//! Benchmarks for the Pali Trie, the Koa Cache and the Prefix Index facade,
//! implemented with the Criterion framework.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use std::time::Duration;

fn words(count: usize, length: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{:0width$}", i, width = length))
        .collect()
}

/// Benchmark the Pali Trie
fn bench_pali_trie(c: &mut Criterion) {
    use lanai_index::data_structures::pali_trie::PaliTrie;

    let mut group = c.benchmark_group("pali_trie");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    // Insert then remove, so every iteration starts from the same trie
    for key_length in [8, 16, 32].iter() {
        group.bench_with_input(
            BenchmarkId::new("insert_remove", key_length),
            key_length,
            |b, &length| {
                let mut trie = PaliTrie::new();
                let keys = words(1000, length);
                let mut index = 0;

                b.iter(|| {
                    let key = &keys[index % keys.len()];
                    index += 1;
                    black_box(trie.insert(key, index).unwrap());
                    black_box(trie.remove(key, &index));
                });
            },
        );
    }

    // Prefix search over a populated trie, by breadth of the match
    let mut trie = PaliTrie::new();
    for (value, key) in words(10_000, 8).iter().enumerate() {
        trie.insert(key, value).unwrap();
    }
    for prefix in ["0000000", "000000", "00000", "0000"].iter() {
        group.bench_with_input(BenchmarkId::new("search", prefix), prefix, |b, prefix| {
            b.iter(|| black_box(trie.search(black_box(prefix)).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark the Koa Cache once it is full, so every put evicts
fn bench_koa_cache(c: &mut Criterion) {
    use lanai_index::config::cache::CacheConfig;
    use lanai_index::data_structures::koa_cache::KoaCache;

    let mut group = c.benchmark_group("koa_cache");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    for capacity in [1_000, 10_000, 100_000].iter() {
        group.bench_with_input(
            BenchmarkId::new("evicting_put", capacity),
            capacity,
            |b, &capacity| {
                let config = CacheConfig {
                    max_entries: Some(capacity),
                    ..CacheConfig::default()
                };
                let cache: KoaCache<usize, usize> = KoaCache::new(&config, |_| None);
                for key in 0..capacity {
                    cache.put(key, key);
                }

                let mut next = capacity;
                b.iter(|| {
                    cache.put(black_box(next), next);
                    next += 1;
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the Prefix Index facade
fn bench_prefix_index(c: &mut Criterion) {
    use lanai_index::config::cache::CacheConfig;
    use lanai_index::{KeyCase, PrefixIndex};

    let mut group = c.benchmark_group("prefix_index");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    for size in [1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("put", size), size, |b, &size| {
            let keys = words(size, 10);
            b.iter(|| {
                let index: PrefixIndex<&str, usize, String> = PrefixIndex::new();
                index
                    .add_cache("bench", CacheConfig::default(), |_| None)
                    .unwrap();
                for (key, word) in keys.iter().enumerate() {
                    index.put(&"bench", key, black_box(word.clone())).unwrap();
                }
            });
        });
    }

    let index: PrefixIndex<&str, usize, String> = PrefixIndex::new();
    let config = CacheConfig {
        key_case: KeyCase::Insensitive,
        ..CacheConfig::default()
    };
    index.add_cache("bench", config, |_| None).unwrap();
    for (key, word) in words(10_000, 8).into_iter().enumerate() {
        index.put(&"bench", key, word).unwrap();
    }
    for prefix in ["0000000", "000000", "00000"].iter() {
        group.bench_with_input(
            BenchmarkId::new("get_by_prefix", prefix),
            prefix,
            |b, prefix| {
                b.iter(|| black_box(index.get_by_prefix(black_box(prefix)).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_pali_trie, bench_koa_cache, bench_prefix_index
}

criterion_main!(benches);

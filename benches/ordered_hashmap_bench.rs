use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use slab_hashmap::OrderedHashMap;
use std::hash::{BuildHasher, Hasher};
use std::time::Duration;

// Hashes u64 keys to themselves. A dense key range 0..n then occupies
// buckets 0..n exactly, so the table settles at the next power of two
// and the benches measure steady-state costs instead of the quadratic
// sparsity a random hasher needs to separate n keys.
#[derive(Clone, Default)]
struct IdentityBuildHasher;
struct IdentityHasher(u64);
impl BuildHasher for IdentityBuildHasher {
    type Hasher = IdentityHasher;
    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher(0)
    }
}
impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        let mut raw = [0u8; 8];
        let n = bytes.len().min(8);
        raw[..n].copy_from_slice(&bytes[..n]);
        self.0 = u64::from_le_bytes(raw);
    }
    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
    fn finish(&self) -> u64 {
        self.0
    }
}

// Bijective scramble of 0..4096 so inserts do not arrive in bucket
// order while the key set stays dense.
fn scrambled(i: u64) -> u64 {
    (i.wrapping_mul(2654435761)) & 4095
}

fn dense_map() -> OrderedHashMap<u64, u64, IdentityBuildHasher> {
    let mut m = OrderedHashMap::with_hasher(IdentityBuildHasher);
    for i in 0..4096 {
        m.insert(scrambled(i), i).unwrap();
    }
    m
}

fn bench_insert_dense(c: &mut Criterion) {
    c.bench_function("ordered_hashmap_insert_4k_dense", |b| {
        b.iter_batched(
            || OrderedHashMap::<u64, u64, IdentityBuildHasher>::with_hasher(IdentityBuildHasher),
            |mut m| {
                for i in 0..4096 {
                    m.insert(scrambled(i), i).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_random_hasher(c: &mut Criterion) {
    // The default hasher separates n keys only in a table of roughly n^2
    // buckets, so this case stays small by design.
    c.bench_function("ordered_hashmap_insert_64_random", |b| {
        b.iter_batched(
            || OrderedHashMap::<u64, u64>::new(),
            |mut m| {
                for i in 0..64 {
                    m.insert(i, i).unwrap();
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("ordered_hashmap_get_hit", |b| {
        let m = dense_map();
        let mut i = 0u64;
        b.iter(|| {
            i = (i + 1) & 4095;
            black_box(m.get(&scrambled(i)));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("ordered_hashmap_get_miss", |b| {
        let m = dense_map();
        let mut k = 4096u64;
        b.iter(|| {
            // 4096..8192 hash onto the empty upper buckets.
            k = 4096 + ((k + 1) & 4095);
            black_box(m.get(&k));
        })
    });
}

fn bench_values_iter(c: &mut Criterion) {
    c.bench_function("ordered_hashmap_values_4k", |b| {
        let m = dense_map();
        b.iter(|| {
            let sum: u64 = m.values().copied().sum();
            black_box(sum)
        })
    });
}

fn bench_remove_insert_churn(c: &mut Criterion) {
    c.bench_function("ordered_hashmap_remove_insert_churn", |b| {
        let mut m = dense_map();
        let mut i = 0u64;
        b.iter(|| {
            let k = scrambled(i & 4095);
            let (key, value) = m.remove(&k).expect("key present");
            m.insert(key, value).unwrap();
            i += 1;
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert_dense, bench_insert_random_hasher, bench_get_hit,
        bench_get_miss, bench_values_iter, bench_remove_insert_churn
}
criterion_main!(benches);

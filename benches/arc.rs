use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use pagecache::policy::arc::ArcCache;

const PAGES: usize = 1024;
const TOTAL_BYTES: usize = PAGES * 32;

fn key(i: usize) -> String {
    format!("page-{i}")
}

/// Full cache with half the pages promoted to T2.
fn warmed() -> ArcCache {
    let mut cache = ArcCache::new(TOTAL_BYTES, PAGES);
    for i in 0..PAGES {
        let k = key(i);
        cache.set(&k, k.as_bytes());
    }
    for i in 0..PAGES / 2 {
        cache.get(&key(i));
    }
    cache
}

fn bench_arc_get_hits(c: &mut Criterion) {
    let keys: Vec<String> = (0..PAGES).map(key).collect();
    c.bench_function("arc_get_hits", |b| {
        b.iter_batched(
            warmed,
            |mut cache| {
                for k in &keys {
                    let _ = std::hint::black_box(cache.get(std::hint::black_box(k)));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_arc_cold_inserts(c: &mut Criterion) {
    let keys: Vec<String> = (0..4 * PAGES).map(|i| key(i + 100_000)).collect();
    c.bench_function("arc_cold_inserts", |b| {
        b.iter_batched(
            warmed,
            |mut cache| {
                for k in &keys {
                    cache.set(std::hint::black_box(k), k.as_bytes());
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_arc_ghost_hits(c: &mut Criterion) {
    // evicted pages come back while still remembered in B1/B2
    let keys: Vec<String> = (0..3 * PAGES).map(|i| key(i % (PAGES + PAGES / 2))).collect();
    c.bench_function("arc_ghost_hits", |b| {
        b.iter_batched(
            warmed,
            |mut cache| {
                for k in &keys {
                    if cache.get(k).is_none() {
                        cache.set(std::hint::black_box(k), k.as_bytes());
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_arc_get_hits,
    bench_arc_cold_inserts,
    bench_arc_ghost_hits
);
criterion_main!(benches);

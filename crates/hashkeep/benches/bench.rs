use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use hashkeep::{AtomicJobIdGenerator, JobId, JobIdGenerator, LockJobIdGenerator, ResultStore, digest};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

fn bench_digest(c: &mut Criterion) {
    let mut group = c.benchmark_group("digest");
    for len in [0_usize, 16, 1024] {
        let input = "x".repeat(len);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_function(format!("bytes/{len}"), |b| {
            b.iter(|| black_box(digest(black_box(&input))));
        });
    }
    group.finish();
}

fn bench_generator<G>(c: &mut Criterion, group_name: &str, generator_factory: impl Fn() -> G)
where
    G: JobIdGenerator,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let generator = generator_factory();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id());
                }
            }
            start.elapsed()
        });
    });
    group.finish();
}

fn bench_generator_threaded<G>(
    c: &mut Criterion,
    group_name: &str,
    generator_factory: impl Fn() -> G,
) where
    G: JobIdGenerator + 'static,
{
    const THREADS: usize = 8;

    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements((TOTAL_IDS * THREADS) as u64));

    group.bench_function(format!("threads/{THREADS}/elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let mut total = core::time::Duration::ZERO;
            for _ in 0..iters {
                let generator = Arc::new(generator_factory());
                let barrier = Arc::new(Barrier::new(THREADS + 1));

                let elapsed = scope(|s| {
                    for _ in 0..THREADS {
                        let generator = Arc::clone(&generator);
                        let barrier = Arc::clone(&barrier);
                        s.spawn(move || {
                            barrier.wait();
                            for _ in 0..TOTAL_IDS {
                                black_box(generator.next_id());
                            }
                        });
                    }
                    let start = Instant::now();
                    barrier.wait();
                    start
                });
                total += elapsed.elapsed();
            }
            total
        });
    });
    group.finish();
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let value = digest("angryMonkey");
    group.bench_function(format!("set/elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let store = ResultStore::new();
                for raw in 1..=TOTAL_IDS as u64 {
                    let id = JobId::new(raw).unwrap();
                    black_box(store.set(id, value.clone(), Instant::now()));
                }
            }
            start.elapsed()
        });
    });

    let store = ResultStore::new();
    for raw in 1..=TOTAL_IDS as u64 {
        store.set(JobId::new(raw).unwrap(), value.clone(), Instant::now());
    }
    group.bench_function(format!("get/elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for raw in 1..=TOTAL_IDS as u64 {
                black_box(store.get(JobId::new(raw).unwrap()));
            }
        });
    });
    group.bench_function("stats", |b| b.iter(|| black_box(store.stats())));
    group.finish();
}

fn benches(c: &mut Criterion) {
    bench_digest(c);
    bench_generator(c, "lock", LockJobIdGenerator::new);
    bench_generator(c, "atomic", AtomicJobIdGenerator::new);
    bench_generator_threaded(c, "lock/threaded", LockJobIdGenerator::new);
    bench_generator_threaded(c, "atomic/threaded", AtomicJobIdGenerator::new);
    bench_store(c);
}

criterion_group!(all, benches);
criterion_main!(all);

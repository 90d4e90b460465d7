use criterion::{criterion_group, criterion_main, Criterion};
use quorum_core::time::vector::{compare, VectorClock};

fn clock_benchmarks(c: &mut Criterion) {
    // Overlapping entry sets, sized at the high end of a realistic
    // replication factor so the two-pointer walk actually walks.
    let a = VectorClock::from_entries((0i16..32).map(|n| (n, n as u64 + 1)), 1).unwrap();
    let b = VectorClock::from_entries((16i16..48).map(|n| (n, 7)), 2).unwrap();

    c.bench_function("compare_32_entries", |bench| bench.iter(|| compare(&a, &b)));

    c.bench_function("merge_32_entries", |bench| bench.iter(|| a.merge(&b)));

    c.bench_function("increment_32_entries", |bench| {
        bench.iter(|| a.incremented_at(17, 3))
    });

    let bytes = a.to_bytes();
    c.bench_function("decode_32_entries", |bench| {
        bench.iter(|| VectorClock::from_bytes(&bytes).unwrap())
    });
}

criterion_group!(benches, clock_benchmarks);
criterion_main!(benches);

//! Benchmarks for priority allocation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stowage_packing::{Allocator, AllocatorConfig, Container, Item, PriorityAllocator};

fn inventory() -> (Vec<Item>, Vec<Container>) {
    let items: Vec<Item> = (0..40)
        .map(|i| {
            Item::new(format!("I{}", i), 10.0, 10.0 + (i % 3) as f64 * 5.0, 10.0)
                .with_priority(i % 7)
                .with_zone(if i % 2 == 0 { "Crew" } else { "Lab" })
        })
        .collect();
    let containers: Vec<Container> = (0..4)
        .map(|i| {
            Container::new(
                format!("C{}", i),
                if i < 2 { "Crew" } else { "Lab" },
                50.0,
                50.0,
                50.0,
            )
        })
        .collect();
    (items, containers)
}

fn allocator_benchmark(c: &mut Criterion) {
    let (items, containers) = inventory();
    let sequential = PriorityAllocator::default_config();
    let parallel = PriorityAllocator::new(AllocatorConfig::new().with_parallel_scan(true));

    c.bench_function("allocate_40_items_sequential", |b| {
        b.iter(|| {
            let result = sequential.allocate(black_box(&items), black_box(&containers));
            black_box(result)
        })
    });

    c.bench_function("allocate_40_items_parallel_scan", |b| {
        b.iter(|| {
            let result = parallel.allocate(black_box(&items), black_box(&containers));
            black_box(result)
        })
    });
}

criterion_group!(benches, allocator_benchmark);
criterion_main!(benches);

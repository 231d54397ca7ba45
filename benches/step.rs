//! Benchmarks for the CPU simulation step and snapshot tessellation.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nodemesh::field::NodeField;
use nodemesh::params::FieldParams;
use nodemesh::spawn::SpawnContext;

/// A field already at the population cap, so the bench covers the full
/// pairwise pass.
fn full_field() -> NodeField {
    let params = FieldParams::new(800.0, 600.0).with_initial_count(25);
    NodeField::with_spawner(params, SpawnContext::seeded(1))
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    group.bench_function("default_population", |b| {
        let mut field = NodeField::with_spawner(FieldParams::default(), SpawnContext::seeded(1));
        b.iter(|| {
            field.step();
            black_box(field.population())
        })
    });

    group.bench_function("capped_population", |b| {
        let mut field = full_field();
        b.iter(|| {
            field.step();
            black_box(field.population())
        })
    });

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    group.bench_function("capped_population", |b| {
        let mut field = full_field();
        for _ in 0..50 {
            field.step();
        }
        b.iter(|| black_box(field.snapshot()))
    });

    group.finish();
}

criterion_group!(benches, bench_step, bench_snapshot);
criterion_main!(benches);

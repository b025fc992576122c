//! Benchmarks for creating, configuring and deleting item trees.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pixle::{ItemOptions, ItemSystem, Value, kind};
use pixle_test_utils::MockToolkit;

fn bench_create_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_tree");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("committed", size), &size, |b, &size| {
            b.iter(|| {
                let mut ui = ItemSystem::new(MockToolkit::new());
                let window = ui.create(&kind::WINDOW, ItemOptions::new()).unwrap();
                for i in 0..size {
                    ui.create(
                        &kind::BUTTON,
                        ItemOptions::new().parent(window).with("width", black_box(i)),
                    )
                    .unwrap();
                }
                ui
            });
        });

        group.bench_with_input(BenchmarkId::new("staged", size), &size, |b, &size| {
            b.iter(|| {
                let mut ui = ItemSystem::new(MockToolkit::new());
                let window = ui.create(&kind::WINDOW, ItemOptions::new()).unwrap();
                for i in 0..size {
                    let id = ui
                        .create(&kind::BUTTON, ItemOptions::new().parent(window).staged())
                        .unwrap();
                    ui.set(id, "width", Value::from(black_box(i))).unwrap();
                    ui.commit_setup(id).unwrap();
                }
                ui
            });
        });
    }

    group.finish();
}

fn bench_delete_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete_tree");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_with_setup(
                || {
                    let mut ui = ItemSystem::new(MockToolkit::new());
                    let window = ui.create(&kind::WINDOW, ItemOptions::new()).unwrap();
                    for _ in 0..size {
                        ui.create(&kind::TEXT, ItemOptions::new().parent(window))
                            .unwrap();
                    }
                    (ui, window)
                },
                |(mut ui, window)| {
                    ui.delete(window).unwrap();
                    ui
                },
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_create_tree, bench_delete_tree);
criterion_main!(benches);

//! Benchmarks for the KD-Tree index and the CURE engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use oxiclust::{Cure, CureConfig, KdTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

fn random_points(count: usize, dimension: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| (0..dimension).map(|_| rng.gen_range(0.0..100.0)).collect()).collect()
}

/// Blobs around a few centers, the shape CURE is meant for
fn blob_points(count: usize, seed: u64) -> Vec<Vec<f64>> {
    let centers = [[10.0, 10.0], [50.0, 80.0], [90.0, 20.0], [40.0, 40.0]];
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let center = centers[i % centers.len()];
            vec![center[0] + rng.gen_range(-5.0..5.0), center[1] + rng.gen_range(-5.0..5.0)]
        })
        .collect()
}

/// Benchmark KD-Tree construction and queries
fn bench_kdtree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree_operations");
    group.measurement_time(Duration::from_secs(5));

    let size = 2000;
    let points = random_points(size, 3, 7);
    group.throughput(Throughput::Elements(size as u64));

    group.bench_function("balanced_build", |b| {
        b.iter(|| {
            let payloads: Vec<usize> = (0..size).collect();
            black_box(KdTree::balanced(points.clone(), Some(payloads)).unwrap());
        });
    });

    group.bench_function("dynamic_insert", |b| {
        b.iter(|| {
            let mut tree = KdTree::new();
            for (index, point) in points.iter().enumerate() {
                tree.insert(point.clone(), Some(index)).unwrap();
            }
            black_box(tree);
        });
    });

    let tree = KdTree::balanced(points.clone(), Some((0..size).collect::<Vec<usize>>())).unwrap();
    group.bench_function("radius_search", |b| {
        b.iter(|| {
            for point in points.iter().take(200) {
                black_box(tree.find_nearest_dist_nodes(point, 5.0).unwrap());
            }
        });
    });

    group.bench_function("remove_all", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                for (index, point) in points.iter().enumerate() {
                    black_box(tree.remove_with_payload(point, &index));
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

/// Benchmark full CURE runs over growing inputs
fn bench_cure_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("cure_process");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(10);

    for size in [100, 250, 500] {
        let data = blob_points(size, 11);
        let config = CureConfig { number_cluster: 4, ..CureConfig::default() };
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut cure = Cure::with_config(data.clone(), config.clone()).unwrap();
                black_box(cure.process().unwrap().clusters.len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_kdtree_operations, bench_cure_process);
criterion_main!(benches);

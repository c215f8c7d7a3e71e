// Copyright 2025 the Asterism Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use asterism_index::{Aabb2D, KdTree, QuadTree};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_grid_points(n: usize, cell: f64) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push([x as f64 * cell, y as f64 * cell]);
        }
    }
    out
}

fn gen_random_points<const D: usize>(count: usize, extent: f64) -> Vec<[f64; D]> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| core::array::from_fn(|_| rng.next_f64() * extent))
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push((cx + dx, cy + dy));
        }
    }
    out
}

fn bench_kdtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("kdtree");
    for &n in &[64usize, 128, 256] {
        let points = gen_grid_points(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("build_search_grid_n{}", n), |b| {
            b.iter(|| {
                let tree = KdTree::from_points(&points, KdTree::<[f64; 2]>::DEFAULT_BUCKET_CAPACITY)
                    .unwrap();
                let hits = tree.search(&[300.0, 300.0], 200.0).len();
                black_box(hits);
            });
        });
    }

    let points = gen_random_points::<3>(50_000, 1000.0);
    let tree = KdTree::from_points(&points, 16).unwrap();
    let centers = gen_random_points::<3>(256, 1000.0);
    group.bench_function("search_random_3d", |b| {
        b.iter(|| {
            let mut hits = 0_usize;
            for c in &centers {
                tree.search_with(c, 25.0, |_| hits += 1);
            }
            black_box(hits);
        });
    });

    for &cap in &[1usize, 8, 64] {
        group.bench_function(format!("build_random_3d_cap{}", cap), |b| {
            b.iter(|| black_box(KdTree::from_points(&points, cap).unwrap().len()));
        });
    }
    group.finish();
}

fn bench_quadtree(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree");
    for &n in &[64usize, 128, 256] {
        let points = gen_grid_points(n, 10.0);
        let query = Aabb2D::new(100.0, 100.0, 500.0, 500.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("build_search_grid_n{}", n), |b| {
            b.iter(|| {
                let tree = QuadTree::from_points(&points, QuadTree::<[f64; 2]>::DEFAULT_BUCKET_CAPACITY);
                black_box(tree.search(&query).len());
            });
        });
        group.bench_function(format!("insert_search_grid_n{}", n), |b| {
            b.iter_batched(
                QuadTree::<[f64; 2]>::new,
                |mut tree| {
                    for p in points.iter().copied() {
                        tree.insert(p);
                    }
                    black_box(tree.search(&query).len());
                },
                BatchSize::SmallInput,
            );
        });
    }

    let clustered = gen_clustered_points(64, 500, 40.0);
    group.bench_function("update_heavy_clustered", |b| {
        b.iter_batched(
            || QuadTree::from_points(&clustered, 16),
            |mut tree| {
                for (i, p) in clustered.iter().enumerate().step_by(7) {
                    tree.remove(p);
                    tree.insert((p.0 + (i % 5) as f64, p.1));
                }
                black_box(tree.len());
            },
            BatchSize::SmallInput,
        );
    });

    let tree = QuadTree::from_points(&clustered, 16);
    let mut rng = Rng::new(0xFACE_FEED_CAFE_BABE);
    let queries: Vec<_> = (0..256)
        .map(|_| {
            let x = rng.next_f64() * 2000.0;
            let y = rng.next_f64() * 2000.0;
            Aabb2D::new(x, y, x + 60.0, y + 60.0)
        })
        .collect();
    group.bench_function("query_heavy_clustered", |b| {
        b.iter(|| {
            let mut hits = 0_usize;
            for q in &queries {
                tree.search_with(q, |_| hits += 1);
            }
            black_box(hits);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_kdtree, bench_quadtree);
criterion_main!(benches);

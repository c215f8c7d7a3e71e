// Copyright 2025 the Asterism Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use asterism_index::{Aabb2D, KdTree, QuadTree};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

use rstar::{AABB, RTree};

fn gen_grid_points(n: usize, cell: f64) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push([x as f64 * cell, y as f64 * cell]);
        }
    }
    out
}

fn bench_rstar_external_compare_f64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rstar_external_compare_f64");
    for &n in &[64usize, 128] {
        let points = gen_grid_points(n, 10.0);
        let query = Aabb2D::new(100.0, 100.0, 500.0, 500.0);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("kdtree_build_query_n{}", n), |b| {
            b.iter(|| {
                let tree = KdTree::from_points(&points, 16).unwrap();
                black_box(tree.search(&[300.0, 300.0], 200.0).len());
            });
        });

        group.bench_function(format!("quadtree_build_query_n{}", n), |b| {
            b.iter(|| {
                let tree = QuadTree::from_points(&points, 40);
                black_box(tree.search(&query).len());
            });
        });

        group.bench_function(format!("quadtree_insert_query_n{}", n), |b| {
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

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || points.clone(),
                |points| {
                    let tree = RTree::bulk_load(points);
                    let aabb = AABB::from_corners(
                        [query.min_x, query.min_y],
                        [query.max_x, query.max_y],
                    );
                    black_box(tree.locate_in_envelope(&aabb).count());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rstar_external_compare_f64);
criterion_main!(benches);

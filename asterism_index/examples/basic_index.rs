// Copyright 2025 the Asterism Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Asterism Index: build both trees, search, insert and remove.

use asterism_index::{Aabb2D, KdTree, QuadTree};

fn main() {
    let points = [
        [0.0, 0.0],
        [10.0, 0.0],
        [0.0, 10.0],
        [10.0, 10.0],
        [5.0, 5.0],
    ];

    let kd = match KdTree::from_points(&points, 2) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("build failed: {err}");
            return;
        }
    };
    println!("kd {:?}", kd);
    println!("kd hits near (5,5): {:?}", kd.search(&[5.0, 5.0], 1.0));

    let mut quad = QuadTree::from_points(&points, 2);
    quad.insert([5.0, 6.0]);
    let query = Aabb2D::new(4.0, 4.0, 6.0, 7.0);
    println!("quad hits in {:?}: {:?}", query, quad.search(&query));

    let removed = quad.remove(&[5.0, 6.0]);
    println!(
        "removed {removed}, now {} points; hits: {:?}",
        quad.len(),
        quad.search(&query)
    );
}

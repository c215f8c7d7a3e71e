// Copyright 2025 the Asterism Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Asterism Index: in-memory point indexes for range search.
//!
//! Two bucket trees are provided:
//!
//! - [`KdTree`]: a static k-dimensional tree. Build it once from a slice of points
//!   and query it with an axis-aligned box given as a center and a radius.
//! - [`QuadTree`]: a dynamic planar tree. Build it from a slice, then [`insert`](QuadTree::insert)
//!   and [`remove`](QuadTree::remove) points and query it with an inclusive rectangle.
//!
//! Both trees store owned copies of the points in leaf buckets of a configurable
//! capacity, and both are generic over the coordinate type through [`Scalar`]
//! (implemented for `f32`, `f64`, `i32` and `i64`). Points are anything implementing
//! [`Point`] (and [`PlanarPoint`] for the quadtree): fixed arrays, `Vec`s and
//! two-element tuples out of the box, plus `kurbo::Point` with the `kurbo` feature.
//!
//! # Example
//!
//! ```rust
//! use asterism_index::KdTree;
//!
//! let points = [[0.0, 0.0], [10.0, 0.0], [0.0, 10.0], [10.0, 10.0], [5.0, 5.0]];
//! let tree = KdTree::from_points(&points, 2).unwrap();
//!
//! // Everything within 1.0 of (5, 5) along each axis.
//! let hits = tree.search(&[5.0, 5.0], 1.0);
//! assert_eq!(hits, vec![[5.0, 5.0]]);
//! ```
//!
//! The quadtree keeps working as points come and go:
//!
//! ```rust
//! use asterism_index::{Aabb2D, QuadTree};
//!
//! let mut tree = QuadTree::from_points(&[(0, 0), (10, 0), (0, 10), (10, 10), (5, 5)], 4);
//! tree.insert((5, 6));
//!
//! let mut hits = tree.search(&Aabb2D::new(4, 4, 6, 7));
//! hits.sort();
//! assert_eq!(hits, vec![(5, 5), (5, 6)]);
//!
//! assert_eq!(tree.remove(&(5, 6)), 1);
//! assert_eq!(tree.len(), 5);
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates. Ordering helpers treat
//! incomparable values as equal, so results are unspecified but memory safe.

#![no_std]

extern crate alloc;

pub mod error;
pub mod kdtree;
mod node;
pub mod point;
pub mod quadtree;
pub mod types;

pub use error::BuildError;
pub use kdtree::KdTree;
pub use point::{PlanarPoint, Point};
pub use quadtree::QuadTree;
pub use types::{Aabb2D, Scalar};

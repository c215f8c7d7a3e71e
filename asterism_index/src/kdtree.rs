// Copyright 2025 the Asterism Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bucket point-region k-d tree for N-dimensional range search.
//!
//! The tree is built once from a point set and is immutable afterwards. Each
//! internal node splits its subset at the median of the axis `depth % dimension`;
//! points at or below the median go left. Subsets no larger than the bucket
//! capacity become leaves.
//!
//! A split whose median puts every point on one side (many points sharing the
//! same coordinate) does not recurse: the whole subset becomes one leaf, which
//! may then hold more points than the bucket capacity.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::error::BuildError;
use crate::node::{Built, NodeIdx};
use crate::point::Point;
use crate::types::{Scalar, cmp_t, le, lt, max_t};

/// Static N-dimensional point index supporting hyperrectangle range search.
///
/// Once built, a `KdTree` is only read, so shared references can be used from
/// several threads at once.
pub struct KdTree<P: Point> {
    root: Option<NodeIdx>,
    arena: Vec<Node<P>>,
    dimension: usize,
    bucket_capacity: usize,
    len: usize,
}

enum Node<P: Point> {
    Leaf(Vec<P>),
    Split {
        axis: usize,
        value: P::Coord,
        // coord <= value
        left: NodeIdx,
        // coord > value
        right: NodeIdx,
    },
}

impl<P: Point> Default for KdTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Point> KdTree<P> {
    /// Bucket capacity used by [`KdTree::new`].
    pub const DEFAULT_BUCKET_CAPACITY: usize = 16;

    /// Create an empty tree.
    pub const fn new() -> Self {
        Self {
            root: None,
            arena: Vec::new(),
            dimension: 0,
            bucket_capacity: Self::DEFAULT_BUCKET_CAPACITY,
            len: 0,
        }
    }

    /// Build a tree over `points`, inferring the dimension from the first point.
    pub fn from_points(points: &[P], bucket_capacity: usize) -> Result<Self, BuildError> {
        let mut tree = Self::new();
        tree.build(points, bucket_capacity)?;
        Ok(tree)
    }

    /// Build a tree of an explicit `dimension` over `points`.
    pub fn from_points_with_dimension(
        points: &[P],
        dimension: usize,
        bucket_capacity: usize,
    ) -> Result<Self, BuildError> {
        let mut tree = Self::new();
        tree.build_with_dimension(points, dimension, bucket_capacity)?;
        Ok(tree)
    }

    /// Rebuild the tree over `points`, discarding the current contents.
    ///
    /// The dimension is taken from the first point. An empty `points` slice
    /// yields an empty tree. `bucket_capacity` is clamped to at least one.
    pub fn build(&mut self, points: &[P], bucket_capacity: usize) -> Result<(), BuildError> {
        match points.first() {
            Some(first) => self.build_with_dimension(points, first.dimension(), bucket_capacity),
            None => {
                self.clear();
                self.dimension = 0;
                self.bucket_capacity = bucket_capacity.max(1);
                Ok(())
            }
        }
    }

    /// Rebuild the tree over `points` in a space of the given `dimension`.
    ///
    /// Every point must expose at least `dimension` coordinates. On error the
    /// tree is left empty.
    pub fn build_with_dimension(
        &mut self,
        points: &[P],
        dimension: usize,
        bucket_capacity: usize,
    ) -> Result<(), BuildError> {
        self.clear();
        self.dimension = 0;
        self.bucket_capacity = bucket_capacity.max(1);
        if dimension < 1 {
            return Err(BuildError::InvalidDimension { dimension });
        }
        if let Some((index, p)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| p.dimension() < dimension)
        {
            return Err(BuildError::ShortPoint {
                index,
                found: p.dimension(),
                expected: dimension,
            });
        }
        self.dimension = dimension;
        self.root = self.build_node(points.to_vec(), 0).node();
        self.len = points.len();
        log::debug!(
            "built k-d tree: {} points, dimension {}, bucket capacity {}, {} nodes",
            self.len,
            self.dimension,
            self.bucket_capacity,
            self.arena.len()
        );
        Ok(())
    }

    fn push(&mut self, node: Node<P>) -> NodeIdx {
        let idx = NodeIdx::new(self.arena.len());
        self.arena.push(node);
        idx
    }

    fn build_node(&mut self, points: Vec<P>, depth: usize) -> Built {
        if points.is_empty() {
            return Built::Empty;
        }
        if points.len() <= self.bucket_capacity {
            return Built::Leaf(self.push(Node::Leaf(points)));
        }

        let axis = depth % self.dimension;
        let value = median(&points, axis);
        let below = points
            .iter()
            .filter(|p| le(p.coord(axis), value))
            .count();
        if below == 0 || below == points.len() {
            log::trace!(
                "k-d split on axis {axis} at depth {depth} is one-sided; keeping {} points in one leaf",
                points.len()
            );
            return Built::Leaf(self.push(Node::Leaf(points)));
        }

        let (left, right): (Vec<P>, Vec<P>) = points
            .into_iter()
            .partition(|p| le(p.coord(axis), value));
        let l = self.build_node(left, depth + 1);
        let r = self.build_node(right, depth + 1);
        match (l.node(), r.node()) {
            (Some(left), Some(right)) => Built::Internal(self.push(Node::Split {
                axis,
                value,
                left,
                right,
            })),
            (Some(_), None) => l,
            (None, Some(_)) => r,
            (None, None) => Built::Empty,
        }
    }

    /// Remove all points, yielding an empty tree. Calling this on an empty tree is a no-op.
    pub fn clear(&mut self) {
        if self.root.is_some() {
            log::debug!("clearing k-d tree with {} points", self.len);
        }
        self.root = None;
        self.arena.clear();
        self.len = 0;
    }

    /// Dimension of the point space, or zero if the tree was built from no points.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Maximum number of points in a leaf, outside of one-sided splits.
    pub fn bucket_capacity(&self) -> usize {
        self.bucket_capacity
    }

    /// Total number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree stores no points.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Collect every stored point inside the hypercube centered on `center`
    /// with half-side `epsilon`. Bounds are inclusive, so an `epsilon` of zero
    /// returns the stored points equal to `center`.
    ///
    /// `center` must expose at least [`KdTree::dimension`] coordinates.
    pub fn search(&self, center: &P, epsilon: P::Coord) -> Vec<P> {
        let mut found = Vec::new();
        self.search_with(center, epsilon, |p| found.push(p.clone()));
        found
    }

    /// Like [`KdTree::search`], but calls `f` once per matching point instead of
    /// collecting them.
    pub fn search_with<F>(&self, center: &P, epsilon: P::Coord, mut f: F)
    where
        F: FnMut(&P),
    {
        let Some(root) = self.root else {
            return;
        };
        let lo: Vec<P::Coord> = (0..self.dimension)
            .map(|i| Scalar::sub(center.coord(i), epsilon))
            .collect();
        let hi: Vec<P::Coord> = (0..self.dimension)
            .map(|i| Scalar::add(center.coord(i), epsilon))
            .collect();

        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            match &self.arena[i.get()] {
                Node::Leaf(points) => {
                    for p in points {
                        let inside = (0..self.dimension).all(|j| {
                            let x = p.coord(j);
                            le(lo[j], x) && le(x, hi[j])
                        });
                        if inside {
                            f(p);
                        }
                    }
                }
                Node::Split {
                    axis,
                    value,
                    left,
                    right,
                } => {
                    // Right goes on the stack first so the left side is visited first.
                    if lt(*value, hi[*axis]) {
                        stack.push(*right);
                    }
                    if le(lo[*axis], *value) {
                        stack.push(*left);
                    }
                }
            }
        }
    }
}

/// Median of the `axis` coordinates; the mean of the two middle values for even counts.
fn median<P: Point>(points: &[P], axis: usize) -> P::Coord {
    let mut v: Vec<P::Coord> = points.iter().map(|p| p.coord(axis)).collect();
    let half = v.len() / 2;
    let (lower, upper, _) = v.select_nth_unstable_by(half, |a, b| cmp_t(a, b));
    let upper = *upper;
    if points.len() % 2 == 1 {
        return upper;
    }
    match lower.iter().copied().reduce(max_t) {
        Some(below) => Scalar::mid(below, upper),
        None => upper,
    }
}

impl<P: Point> Debug for KdTree<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KdTree")
            .field("dimension", &self.dimension)
            .field("bucket_capacity", &self.bucket_capacity)
            .field("len", &self.len)
            .field("arena_nodes", &self.arena.len())
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

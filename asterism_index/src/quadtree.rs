// Copyright 2025 the Asterism Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bucket region quadtree for planar points with insertion and deletion.
//!
//! Internal nodes split their rectangle at its midpoint into four quadrants.
//! Points with `x <= mid_x` go west and points with `y <= mid_y` go north. The
//! midpoint is fixed when a node is split. Node rectangles only grow, on
//! insertion, and each grows on its own side of its parent's midpoint.
//!
//! Leaves keep their points sorted by `(x, y)`, so a range query binary-searches
//! the x-interval and only tests y within that slice.
//!
//! Quadrants with no points are absent rather than empty leaves, and an internal
//! node left with a single child is replaced by that child.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;
use core::ops::Range;

use crate::node::{Built, NodeIdx};
use crate::point::PlanarPoint;
use crate::types::{Aabb2D, Scalar, cmp_t, le, lt};

/// Dynamic planar point index supporting rectangle range search, insertion and deletion.
///
/// Mutation takes `&mut self`; sharing a `QuadTree` across threads while it is
/// being modified needs an external lock around the whole tree.
pub struct QuadTree<P: PlanarPoint> {
    root: Option<NodeIdx>,
    arena: Vec<Node<P>>,
    free_list: Vec<NodeIdx>,
    bucket_capacity: usize,
    len: usize,
}

struct Node<P: PlanarPoint> {
    rect: Aabb2D<P::Coord>,
    kind: Kind<P>,
}

enum Kind<P: PlanarPoint> {
    /// Points sorted lexicographically by `(x, y)`.
    Leaf(Vec<P>),
    Internal {
        center: (P::Coord, P::Coord),
        quadrants: [Option<NodeIdx>; 4],
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    fn of<T: PartialOrd>(center: (T, T), x: T, y: T) -> Self {
        match (le(x, center.0), le(y, center.1)) {
            (true, true) => Self::NorthWest,
            (false, true) => Self::NorthEast,
            (true, false) => Self::SouthWest,
            (false, false) => Self::SouthEast,
        }
    }

    fn rect<T: Copy>(self, r: &Aabb2D<T>, center: (T, T)) -> Aabb2D<T> {
        let (cx, cy) = center;
        match self {
            Self::NorthWest => Aabb2D::new(r.min_x, r.min_y, cx, cy),
            Self::NorthEast => Aabb2D::new(cx, r.min_y, r.max_x, cy),
            Self::SouthWest => Aabb2D::new(r.min_x, cy, cx, r.max_y),
            Self::SouthEast => Aabb2D::new(cx, cy, r.max_x, r.max_y),
        }
    }

    const fn slot(self) -> usize {
        self as usize
    }
}

fn lexicographic<P: PlanarPoint>(a: &P, b: &P) -> Ordering {
    cmp_t(&a.x(), &b.x()).then_with(|| cmp_t(&a.y(), &b.y()))
}

fn cmp_to<P: PlanarPoint>(p: &P, x: P::Coord, y: P::Coord) -> Ordering {
    cmp_t(&p.x(), &x).then_with(|| cmp_t(&p.y(), &y))
}

/// Index range of the sorted leaf points whose x lies within `rect`'s x-interval.
fn x_range<P: PlanarPoint>(points: &[P], rect: &Aabb2D<P::Coord>) -> Range<usize> {
    let start = points.partition_point(|p| lt(p.x(), rect.min_x));
    let end = points.partition_point(|p| le(p.x(), rect.max_x));
    start..end.max(start)
}

fn within_y<P: PlanarPoint>(p: &P, rect: &Aabb2D<P::Coord>) -> bool {
    let y = p.y();
    le(rect.min_y, y) && le(y, rect.max_y)
}

impl<P: PlanarPoint> Default for QuadTree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PlanarPoint> QuadTree<P> {
    /// Bucket capacity used by [`QuadTree::new`].
    pub const DEFAULT_BUCKET_CAPACITY: usize = 40;

    /// Create an empty tree with the default bucket capacity.
    pub const fn new() -> Self {
        Self::with_bucket_capacity(Self::DEFAULT_BUCKET_CAPACITY)
    }

    /// Create an empty tree; `bucket_capacity` is clamped to at least one.
    pub const fn with_bucket_capacity(bucket_capacity: usize) -> Self {
        Self {
            root: None,
            arena: Vec::new(),
            free_list: Vec::new(),
            bucket_capacity: if bucket_capacity == 0 {
                1
            } else {
                bucket_capacity
            },
            len: 0,
        }
    }

    /// Build a tree over `points`.
    pub fn from_points(points: &[P], bucket_capacity: usize) -> Self {
        let mut tree = Self::with_bucket_capacity(bucket_capacity);
        tree.build(points, bucket_capacity);
        tree
    }

    /// Rebuild the tree over `points`, discarding the current contents.
    ///
    /// The root covers the bounding box of `points` (a degenerate box at the
    /// origin when there are none). `bucket_capacity` is clamped to at least one.
    pub fn build(&mut self, points: &[P], bucket_capacity: usize) {
        self.clear();
        self.bucket_capacity = bucket_capacity.max(1);
        let origin = Aabb2D::from_point(P::Coord::zero(), P::Coord::zero());
        let rect = Aabb2D::from_points(points.iter().map(|p| (p.x(), p.y()))).unwrap_or(origin);
        self.root = self.build_node(rect, points.to_vec()).node();
        self.len = points.len();
        log::debug!(
            "built quadtree: {} points, bucket capacity {}, {} nodes",
            self.len,
            self.bucket_capacity,
            self.arena.len()
        );
    }

    fn alloc(&mut self, node: Node<P>) -> NodeIdx {
        if let Some(idx) = self.free_list.pop() {
            self.arena[idx.get()] = node;
            idx
        } else {
            let idx = NodeIdx::new(self.arena.len());
            self.arena.push(node);
            idx
        }
    }

    fn release(&mut self, idx: NodeIdx) {
        // Drop the slot's contents now; the slot itself is reused by `alloc`.
        self.arena[idx.get()].kind = Kind::Leaf(Vec::new());
        self.free_list.push(idx);
    }

    fn leaf(&mut self, rect: Aabb2D<P::Coord>, mut points: Vec<P>) -> NodeIdx {
        points.sort_by(lexicographic);
        self.alloc(Node {
            rect,
            kind: Kind::Leaf(points),
        })
    }

    fn build_node(&mut self, rect: Aabb2D<P::Coord>, points: Vec<P>) -> Built {
        if points.is_empty() {
            return Built::Empty;
        }
        if points.len() <= self.bucket_capacity {
            return Built::Leaf(self.leaf(rect, points));
        }

        let center = (
            P::Coord::mid(rect.min_x, rect.max_x),
            P::Coord::mid(rect.min_y, rect.max_y),
        );
        let mut parts: [Vec<P>; 4] = core::array::from_fn(|_| Vec::new());
        for p in points {
            parts[Quadrant::of(center, p.x(), p.y()).slot()].push(p);
        }

        // Every point in one quadrant that is as large as this rectangle: splitting
        // again cannot separate them.
        let mut occupied = Quadrant::ALL
            .into_iter()
            .filter(|q| !parts[q.slot()].is_empty());
        if let (Some(q), None) = (occupied.next(), occupied.next())
            && q.rect(&rect, center) == rect
        {
            let points = core::mem::take(&mut parts[q.slot()]);
            log::trace!(
                "quadrant split cannot separate {} points; keeping an oversized leaf",
                points.len()
            );
            return Built::Leaf(self.leaf(rect, points));
        }

        let mut quadrants = [None; 4];
        let mut children = 0;
        let mut last = Built::Empty;
        for q in Quadrant::ALL {
            let built = self.build_node(q.rect(&rect, center), core::mem::take(&mut parts[q.slot()]));
            if let Some(child) = built.node() {
                quadrants[q.slot()] = Some(child);
                children += 1;
                last = built;
            }
        }
        match children {
            0 | 1 => last,
            _ => Built::Internal(self.alloc(Node {
                rect,
                kind: Kind::Internal { center, quadrants },
            })),
        }
    }

    /// Remove all points, yielding an empty tree. Calling this on an empty tree is a no-op.
    pub fn clear(&mut self) {
        if self.root.is_some() {
            log::debug!("clearing quadtree with {} points", self.len);
        }
        self.root = None;
        self.arena.clear();
        self.free_list.clear();
        self.len = 0;
    }

    /// Maximum number of points in a leaf, outside of inseparable duplicates.
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

    /// Collect every stored point inside `rect`. Bounds are inclusive.
    pub fn search(&self, rect: &Aabb2D<P::Coord>) -> Vec<P> {
        let mut found = Vec::new();
        self.search_with(rect, |p| found.push(p.clone()));
        found
    }

    /// Like [`QuadTree::search`], but calls `f` once per matching point instead
    /// of collecting them.
    pub fn search_with<F>(&self, rect: &Aabb2D<P::Coord>, mut f: F)
    where
        F: FnMut(&P),
    {
        let Some(root) = self.root else {
            return;
        };
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            let node = &self.arena[i.get()];
            if !node.rect.intersects(rect) {
                continue;
            }
            match &node.kind {
                Kind::Leaf(points) => {
                    for p in &points[x_range(points, rect)] {
                        if within_y(p, rect) {
                            f(p);
                        }
                    }
                }
                Kind::Internal { quadrants, .. } => {
                    stack.extend(quadrants.iter().rev().flatten());
                }
            }
        }
    }

    /// Insert a point. Duplicates are stored as separate entries.
    pub fn insert(&mut self, point: P) {
        self.root = Some(match self.root {
            Some(root) => self.insert_node(root, point),
            None => {
                let rect = Aabb2D::from_point(point.x(), point.y());
                self.leaf(rect, vec![point])
            }
        });
        self.len += 1;
    }

    /// Insert `point` below `idx`; returns the node that now occupies `idx`'s place.
    fn insert_node(&mut self, idx: NodeIdx, point: P) -> NodeIdx {
        let capacity = self.bucket_capacity;
        let (x, y) = (point.x(), point.y());
        let node = &mut self.arena[idx.get()];
        node.rect.union_point(x, y);
        let rect = node.rect;
        match &mut node.kind {
            Kind::Leaf(points) => {
                if points.len() < capacity {
                    let at = points.partition_point(|p| lexicographic(p, &point) != Ordering::Greater);
                    points.insert(at, point);
                    return idx;
                }
                let mut points = core::mem::take(points);
                points.push(point);
                log::trace!("splitting full leaf of {} points", points.len());
                let replacement = match self.build_node(rect, points) {
                    Built::Leaf(n) | Built::Internal(n) => n,
                    Built::Empty => unreachable!("a split leaf always holds the new point"),
                };
                self.release(idx);
                replacement
            }
            Kind::Internal { center, quadrants } => {
                let center = *center;
                let q = Quadrant::of(center, x, y);
                let child = match quadrants[q.slot()] {
                    Some(child) => self.insert_node(child, point),
                    None => {
                        let mut r = q.rect(&rect, center);
                        r.union_point(x, y);
                        self.leaf(r, vec![point])
                    }
                };
                if let Kind::Internal { quadrants, .. } = &mut self.arena[idx.get()].kind {
                    quadrants[q.slot()] = Some(child);
                }
                idx
            }
        }
    }

    /// Write back an internal node's children after a deletion, collapsing it if
    /// fewer than two remain. Returns the node that now occupies `idx`'s place.
    fn settle(&mut self, idx: NodeIdx, quadrants: [Option<NodeIdx>; 4]) -> Option<NodeIdx> {
        let mut live = quadrants.iter().flatten();
        match (live.next(), live.next()) {
            (None, _) => {
                self.release(idx);
                None
            }
            (Some(&only), None) => {
                self.release(idx);
                Some(only)
            }
            _ => {
                if let Kind::Internal { quadrants: q, .. } = &mut self.arena[idx.get()].kind {
                    *q = quadrants;
                }
                Some(idx)
            }
        }
    }

    /// Remove every stored point equal to `point`. Returns how many were removed.
    pub fn remove(&mut self, point: &P) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let (root, removed) = self.remove_point(root, point.x(), point.y());
        self.root = root;
        self.len -= removed;
        removed
    }

    fn remove_point(
        &mut self,
        idx: NodeIdx,
        x: P::Coord,
        y: P::Coord,
    ) -> (Option<NodeIdx>, usize) {
        let node = &mut self.arena[idx.get()];
        if !node.rect.contains_point(x, y) {
            return (Some(idx), 0);
        }
        match &mut node.kind {
            Kind::Leaf(points) => {
                let start = points.partition_point(|p| cmp_to(p, x, y) == Ordering::Less);
                let end = points.partition_point(|p| cmp_to(p, x, y) != Ordering::Greater);
                points.drain(start..end);
                let emptied = points.is_empty();
                if emptied {
                    self.release(idx);
                    (None, end - start)
                } else {
                    (Some(idx), end - start)
                }
            }
            Kind::Internal { quadrants, .. } => {
                let mut quadrants = *quadrants;
                let mut removed = 0;
                for slot in &mut quadrants {
                    if let Some(child) = *slot {
                        let (kept, n) = self.remove_point(child, x, y);
                        *slot = kept;
                        removed += n;
                    }
                }
                (self.settle(idx, quadrants), removed)
            }
        }
    }

    /// Remove every stored point inside `rect` (inclusive bounds). Returns how many were removed.
    pub fn remove_rect(&mut self, rect: &Aabb2D<P::Coord>) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let (root, removed) = self.remove_in_rect(root, rect);
        self.root = root;
        self.len -= removed;
        removed
    }

    fn remove_in_rect(
        &mut self,
        idx: NodeIdx,
        rect: &Aabb2D<P::Coord>,
    ) -> (Option<NodeIdx>, usize) {
        let node = &mut self.arena[idx.get()];
        if !node.rect.intersects(rect) {
            return (Some(idx), 0);
        }
        match &mut node.kind {
            Kind::Leaf(points) => {
                let candidates = x_range(points, rect);
                let before = points.len();
                let mut i = 0;
                points.retain(|p| {
                    let hit = candidates.contains(&i) && within_y(p, rect);
                    i += 1;
                    !hit
                });
                let removed = before - points.len();
                if points.is_empty() {
                    self.release(idx);
                    (None, removed)
                } else {
                    (Some(idx), removed)
                }
            }
            Kind::Internal { quadrants, .. } => {
                let mut quadrants = *quadrants;
                let mut removed = 0;
                for slot in &mut quadrants {
                    if let Some(child) = *slot {
                        let (kept, n) = self.remove_in_rect(child, rect);
                        *slot = kept;
                        removed += n;
                    }
                }
                (self.settle(idx, quadrants), removed)
            }
        }
    }
}

impl<P: PlanarPoint> Debug for QuadTree<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("bucket_capacity", &self.bucket_capacity)
            .field("len", &self.len)
            .field("arena_nodes", &self.arena.len())
            .field("free_list", &self.free_list.len())
            .field("has_root", &self.root.is_some())
            .finish_non_exhaustive()
    }
}

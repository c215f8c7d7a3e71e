// Copyright 2025 the Asterism Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point abstractions consumed by the trees.

use alloc::vec::Vec;

use crate::types::Scalar;

/// A point with a fixed number of scalar coordinates.
///
/// The trees only read coordinates through [`Point::coord`]; they never mutate
/// caller points and clone a point only when storing it in a leaf.
pub trait Point: Clone {
    /// Coordinate type.
    type Coord: Scalar;

    /// Number of coordinates this point exposes.
    fn dimension(&self) -> usize;

    /// Coordinate along `axis`, with `0 <= axis < self.dimension()`.
    fn coord(&self, axis: usize) -> Self::Coord;
}

/// A point in the plane, as stored by the [`QuadTree`](crate::QuadTree).
pub trait PlanarPoint: Point {
    /// Horizontal coordinate.
    #[inline]
    fn x(&self) -> Self::Coord {
        self.coord(0)
    }

    /// Vertical coordinate.
    #[inline]
    fn y(&self) -> Self::Coord {
        self.coord(1)
    }
}

impl<T: Scalar, const N: usize> Point for [T; N] {
    type Coord = T;

    #[inline]
    fn dimension(&self) -> usize {
        N
    }

    #[inline]
    fn coord(&self, axis: usize) -> T {
        self[axis]
    }
}

impl<T: Scalar> PlanarPoint for [T; 2] {}

impl<T: Scalar> Point for Vec<T> {
    type Coord = T;

    #[inline]
    fn dimension(&self) -> usize {
        self.len()
    }

    #[inline]
    fn coord(&self, axis: usize) -> T {
        self[axis]
    }
}

impl<T: Scalar> Point for (T, T) {
    type Coord = T;

    #[inline]
    fn dimension(&self) -> usize {
        2
    }

    #[inline]
    fn coord(&self, axis: usize) -> T {
        match axis {
            0 => self.0,
            1 => self.1,
            _ => panic!("axis {axis} out of range for a planar point"),
        }
    }
}

impl<T: Scalar> PlanarPoint for (T, T) {
    #[inline]
    fn x(&self) -> T {
        self.0
    }

    #[inline]
    fn y(&self) -> T {
        self.1
    }
}

#[cfg(feature = "kurbo")]
impl Point for kurbo::Point {
    type Coord = f64;

    #[inline]
    fn dimension(&self) -> usize {
        2
    }

    #[inline]
    fn coord(&self, axis: usize) -> f64 {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => panic!("axis {axis} out of range for a planar point"),
        }
    }
}

#[cfg(feature = "kurbo")]
impl PlanarPoint for kurbo::Point {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    fn y(&self) -> f64 {
        self.y
    }
}

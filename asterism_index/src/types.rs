// Copyright 2025 the Asterism Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;

/// Axis-aligned rectangle in 2D, closed on all sides.
///
/// Used as the query and node region of the [`QuadTree`](crate::QuadTree).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Aabb2D<T> {
    /// Minimum x (left)
    pub min_x: T,
    /// Minimum y (top)
    pub min_y: T,
    /// Maximum x (right)
    pub max_x: T,
    /// Maximum y (bottom)
    pub max_y: T,
}

impl<T> Aabb2D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Copy> Aabb2D<T> {
    /// A degenerate AABB covering exactly one point.
    pub const fn from_point(x: T, y: T) -> Self {
        Self::new(x, y, x, y)
    }
}

impl<T: Copy + PartialOrd> Aabb2D<T> {
    /// Whether this AABB contains the point. Bounds are inclusive.
    pub fn contains_point(&self, x: T, y: T) -> bool {
        le(self.min_x, x) && le(self.min_y, y) && le(x, self.max_x) && le(y, self.max_y)
    }

    /// Whether two AABBs share at least one point (touching edges count).
    pub fn intersects(&self, other: &Self) -> bool {
        le(other.min_x, self.max_x)
            && le(self.min_x, other.max_x)
            && le(other.min_y, self.max_y)
            && le(self.min_y, other.max_y)
    }

    /// Grow this AABB so that it contains the point.
    pub fn union_point(&mut self, x: T, y: T) {
        self.min_x = min_t(self.min_x, x);
        self.min_y = min_t(self.min_y, y);
        self.max_x = max_t(self.max_x, x);
        self.max_y = max_t(self.max_y, y);
    }

    /// Bounding box of a set of `(x, y)` pairs, or `None` if the set is empty.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (T, T)>,
    {
        let mut it = points.into_iter();
        let (x, y) = it.next()?;
        let mut acc = Self::from_point(x, y);
        for (x, y) in it {
            acc.union_point(x, y);
        }
        Some(acc)
    }

    /// Return true if the AABB is inverted (max below min). Assumes no NaN.
    ///
    /// A degenerate AABB covering a single point is not empty.
    pub fn is_empty(&self) -> bool {
        lt(self.max_x, self.min_x) || lt(self.max_y, self.min_y)
    }
}

#[cfg(feature = "kurbo")]
impl From<kurbo::Rect> for Aabb2D<f64> {
    fn from(r: kurbo::Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.x1, r.y1)
    }
}

/// Numeric scalar abstraction for point coordinates.
///
/// This trait provides the minimal arithmetic needed by the trees: widening a
/// search center by a tolerance and computing midpoints for median and quadrant
/// splits. Ordering comes from `PartialOrd`; NaN is not supported.
pub trait Scalar: Copy + PartialOrd + Debug {
    /// Add two scalar values.
    fn add(a: Self, b: Self) -> Self;

    /// Subtract two scalar values: a - b.
    fn sub(a: Self, b: Self) -> Self;

    /// Zero value for the scalar type.
    fn zero() -> Self;

    /// Midpoint between a and b.
    fn mid(a: Self, b: Self) -> Self;
}

impl Scalar for f32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

impl Scalar for f64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a + b
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a - b
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        0.5 * (a + b)
    }
}

impl Scalar for i32 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Average without overflow, rounding toward negative infinity.
        (a & b) + ((a ^ b) >> 1)
    }
}

impl Scalar for i64 {
    #[inline]
    fn add(a: Self, b: Self) -> Self {
        a.saturating_add(b)
    }

    #[inline]
    fn sub(a: Self, b: Self) -> Self {
        a.saturating_sub(b)
    }

    #[inline]
    fn zero() -> Self {
        0
    }

    #[inline]
    fn mid(a: Self, b: Self) -> Self {
        // Average without overflow: (a & b) + ((a ^ b) >> 1)
        (a & b) + ((a ^ b) >> 1)
    }
}

/// Ordering for scalars that treats incomparable values as equal.
#[inline]
pub(crate) fn cmp_t<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_bounds() {
        let r = Aabb2D::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(0.0, 10.0));
        assert!(r.contains_point(10.0, 0.0));
        assert!(!r.contains_point(10.5, 0.0));
        assert!(r.intersects(&Aabb2D::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!r.intersects(&Aabb2D::new(10.5, 0.0, 20.0, 20.0)));
    }

    #[test]
    fn bounding_box_of_points() {
        assert_eq!(Aabb2D::<i64>::from_points([]), None);
        let bb = Aabb2D::from_points([(3, 4), (-1, 7), (2, -5)]).unwrap();
        assert_eq!(bb, Aabb2D::new(-1, -5, 3, 7));
        assert!(!bb.is_empty());
        assert!(!Aabb2D::from_point(1, 1).is_empty());
    }

    #[test]
    fn integer_midpoint_does_not_overflow() {
        assert_eq!(<i64 as Scalar>::mid(i64::MAX, i64::MAX - 2), i64::MAX - 1);
        assert_eq!(<i64 as Scalar>::mid(-3, 0), -2);
        assert_eq!(<i32 as Scalar>::mid(0, 1), 0);
    }
}

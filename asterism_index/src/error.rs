// Copyright 2025 the Asterism Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build-time configuration errors.

/// Reasons a [`KdTree`](crate::KdTree) build can be rejected.
///
/// A failed build leaves the tree empty; the caller is expected to fix the
/// input and build again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The resolved point-space dimension is less than one.
    #[error("invalid point space dimension {dimension}, expected at least 1")]
    InvalidDimension {
        /// The dimension that was supplied or inferred.
        dimension: usize,
    },
    /// A point exposes fewer coordinates than the tree dimension.
    #[error("point {index} has {found} coordinates, tree dimension is {expected}")]
    ShortPoint {
        /// Position of the offending point in the build input.
        index: usize,
        /// Number of coordinates the point exposes.
        found: usize,
        /// Resolved tree dimension.
        expected: usize,
    },
}

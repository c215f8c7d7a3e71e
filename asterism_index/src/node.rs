// Copyright 2025 the Asterism Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena handles shared by both trees.

/// Index of a node in a tree's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// Outcome of one recursive build or split step.
///
/// Internal nodes are only allocated after their children are known to be
/// non-degenerate, so no step ever has to discard a half-built node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Built {
    /// No points reached this subtree.
    Empty,
    /// A leaf was allocated.
    Leaf(NodeIdx),
    /// An internal node with at least two non-empty children was allocated.
    Internal(NodeIdx),
}

impl Built {
    pub(crate) const fn node(self) -> Option<NodeIdx> {
        match self {
            Self::Empty => None,
            Self::Leaf(i) | Self::Internal(i) => Some(i),
        }
    }
}

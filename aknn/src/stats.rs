use std::{
    ops::AddAssign,
    sync::atomic::{AtomicU64, Ordering},
};

/// Work done by one or more searches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Number of nodes popped from the candidate queue.
    pub nodes_visited: u64,
    /// Number of leaves among the visited nodes.
    pub leaves_visited: u64,
    /// Number of points whose distance to the query was computed.
    pub points_examined: u64,
}

impl AddAssign for SearchStats {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.nodes_visited += rhs.nodes_visited;
        self.leaves_visited += rhs.leaves_visited;
        self.points_examined += rhs.points_examined;
    }
}

/// Cumulative [`SearchStats`] of a tree, updated concurrently by its searches.
#[derive(Debug, Default)]
pub(crate) struct AtomicStats {
    nodes_visited: AtomicU64,
    leaves_visited: AtomicU64,
    points_examined: AtomicU64,
}

impl AtomicStats {
    #[inline]
    pub(crate) fn add(&self, stats: &SearchStats) {
        self.nodes_visited
            .fetch_add(stats.nodes_visited, Ordering::Relaxed);
        self.leaves_visited
            .fetch_add(stats.leaves_visited, Ordering::Relaxed);
        self.points_examined
            .fetch_add(stats.points_examined, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn load(&self) -> SearchStats {
        SearchStats {
            nodes_visited: self.nodes_visited.load(Ordering::Relaxed),
            leaves_visited: self.leaves_visited.load(Ordering::Relaxed),
            points_examined: self.points_examined.load(Ordering::Relaxed),
        }
    }

    #[inline]
    pub(crate) fn reset(&self) {
        self.nodes_visited.store(0, Ordering::Relaxed);
        self.leaves_visited.store(0, Ordering::Relaxed);
        self.points_examined.store(0, Ordering::Relaxed);
    }
}

impl Clone for AtomicStats {
    fn clone(&self) -> Self {
        let stats = Self::default();
        stats.add(&self.load());
        stats
    }
}

/// Shape of a built tree.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeStats {
    /// Number of split and shrink nodes.
    pub inner_nodes: usize,
    /// Number of leaves.
    pub leaf_nodes: usize,
    /// Number of split nodes.
    pub split_nodes: usize,
    /// Number of shrink nodes.
    pub shrink_nodes: usize,
    /// Number of child slots of inner nodes without a child.
    pub empty_children: usize,
    /// Largest depth of a leaf, the root being at depth 0.
    pub max_depth: usize,
    /// Mean depth of the leaves.
    pub avg_depth: f64,
    /// Mean number of points in a leaf.
    pub avg_leaf_size: f64,
    /// Memory used by the nodes, their cells and the point permutation, in bytes.
    pub memory_bytes: usize,
}

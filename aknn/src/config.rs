use crate::{queue::QueueKind, Error, Result, Scalar};
use std::time::Instant;

/// Strategy used to decompose the cells of a tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decomposition {
    /// Only split nodes. Depth is not bounded for clustered inputs.
    Split,
    /// Split and shrink nodes, bounding the depth to O(log n).
    #[default]
    SplitShrink,
}

/// Rule choosing where a cell is cut.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplitRule {
    /// Cut the longest side of the cell at its midpoint.
    #[default]
    Midpoint,
    /// Cut at the median of the points along the dimension of largest spread, keeping the aspect
    /// ratio of both halves bounded.
    Fair,
}

/// Parameters of the construction of a [`BbdTree`](crate::BbdTree).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildConfig {
    /// Maximum number of points in a leaf, unless all of them coincide.
    pub leaf_size: usize,
    /// Decomposition strategy.
    pub decomposition: Decomposition,
    /// Rule choosing the cuts.
    pub split_rule: SplitRule,
    /// Largest share of the points of a node its inner box may keep before a shrink is emitted.
    pub shrink_fraction: f64,
}

impl Default for BuildConfig {
    #[inline]
    fn default() -> Self {
        Self {
            leaf_size: 10,
            decomposition: Decomposition::default(),
            split_rule: SplitRule::default(),
            shrink_fraction: 2.0 / 3.0,
        }
    }
}

impl BuildConfig {
    /// Sets the maximum number of points in a leaf.
    #[inline]
    pub const fn with_leaf_size(mut self, leaf_size: usize) -> Self {
        self.leaf_size = leaf_size;
        self
    }

    /// Sets the decomposition strategy.
    #[inline]
    pub const fn with_decomposition(mut self, decomposition: Decomposition) -> Self {
        self.decomposition = decomposition;
        self
    }

    /// Sets the rule choosing the cuts.
    #[inline]
    pub const fn with_split_rule(mut self, split_rule: SplitRule) -> Self {
        self.split_rule = split_rule;
        self
    }

    /// Sets the shrink fraction.
    #[inline]
    pub const fn with_shrink_fraction(mut self, shrink_fraction: f64) -> Self {
        self.shrink_fraction = shrink_fraction;
        self
    }

    /// Checks that the leaf size is at least 1 and the shrink fraction is in `[0.5, 1)`.
    pub fn validate(&self) -> Result<()> {
        if self.leaf_size == 0 {
            return Err(Error::InvalidLeafSize);
        }

        if !(0.5..1.0).contains(&self.shrink_fraction) {
            return Err(Error::InvalidShrinkFraction);
        }

        Ok(())
    }
}

/// Limit on the work of a single search.
///
/// A search stopped by its budget returns the best neighbours found so far without any distance
/// guarantee.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Budget {
    /// Run until the search completes.
    #[default]
    Unlimited,
    /// Stop once the instant is reached.
    Deadline(Instant),
    /// Stop after visiting this many leaves.
    MaxLeaves(usize),
}

impl Budget {
    #[inline]
    pub(crate) fn is_exhausted(&self, leaves_visited: u64) -> bool {
        match *self {
            Self::Unlimited => false,
            Self::Deadline(deadline) => Instant::now() >= deadline,
            Self::MaxLeaves(max) => leaves_visited >= max as u64,
        }
    }
}

/// Parameters of a nearest-neighbour search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchConfig<S> {
    /// Number of neighbours to find.
    pub k: usize,
    /// Approximation factor, `0` for an exact search.
    pub epsilon: S,
    /// Queue ordering the nodes left to visit.
    pub candidates: QueueKind,
    /// Queue holding the `k` best points.
    pub results: QueueKind,
    /// Limit on the work of the search.
    pub budget: Budget,
}

impl<S: Scalar> SearchConfig<S> {
    /// Creates a new exact [`SearchConfig`] for `k` neighbours.
    #[inline]
    pub fn new(k: usize) -> Self {
        Self {
            k,
            epsilon: S::ZERO,
            candidates: QueueKind::default(),
            results: QueueKind::default(),
            budget: Budget::default(),
        }
    }

    /// Sets the approximation factor.
    #[inline]
    pub fn with_epsilon(mut self, epsilon: S) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the queue kinds used for the candidates and the results.
    #[inline]
    pub fn with_queues(mut self, candidates: QueueKind, results: QueueKind) -> Self {
        self.candidates = candidates;
        self.results = results;
        self
    }

    /// Sets the budget.
    #[inline]
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Checks that `k` is in `1..=len` and the approximation factor is finite and non-negative.
    pub fn validate(&self, len: usize) -> Result<()> {
        if self.k == 0 || self.k > len {
            return Err(Error::InvalidK { k: self.k, len });
        }

        if !self.epsilon.is_finite() || self.epsilon < S::ZERO {
            return Err(Error::InvalidEpsilon);
        }

        Ok(())
    }
}

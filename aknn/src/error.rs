use thiserror::Error;

/// Errors returned when building or querying a [`BbdTree`](crate::BbdTree) and when reading from
/// a [`PriorityQueue`](crate::queue::PriorityQueue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A coordinate vector does not have the dimension of the tree.
    #[error("expected a point of dimension {expected}, found {found}")]
    InvalidDimension {
        /// Dimension of the tree.
        expected: usize,
        /// Length of the offending coordinate vector.
        found: usize,
    },
    /// A point has an infinite or NaN coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending point in the input.
        index: usize,
    },
    /// A query has an infinite or NaN coordinate.
    #[error("query has a non-finite coordinate")]
    NonFiniteQuery,
    /// A tree cannot be built from zero points.
    #[error("cannot build a tree from an empty point set")]
    EmptyPointSet,
    /// The number of requested neighbours is zero or greater than the number of points.
    #[error("k must be in 1..={len}, got {k}")]
    InvalidK {
        /// Requested number of neighbours.
        k: usize,
        /// Number of points in the tree.
        len: usize,
    },
    /// The approximation factor is negative, infinite or NaN.
    #[error("epsilon must be finite and non-negative")]
    InvalidEpsilon,
    /// The leaf size is zero.
    #[error("leaf size must be at least 1")]
    InvalidLeafSize,
    /// The shrink fraction is outside `[0.5, 1)`.
    #[error("shrink fraction must be in [0.5, 1)")]
    InvalidShrinkFraction,
    /// Peek or pop on an empty priority queue.
    #[error("priority queue is empty")]
    QueueEmpty,
    /// A node or point index is out of bounds.
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of stored elements.
        len: usize,
    },
}

/// Result type of fallible operations of this crate.
pub type Result<T> = std::result::Result<T, Error>;

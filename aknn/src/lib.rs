#![warn(missing_docs)]
//! # aknn
//!
//! aknn is a crate providing exact and approximate k-nearest-neighbour search over static sets of
//! points in Rust, built on box-decomposition trees (BBD-trees).
//!
//! ## Goals
//!
//! The main goal of this crate is to answer many nearest-neighbour queries over a point set that
//! does not change once indexed. The tree is built once, in O(n log n), and every query then visits
//! only the cells that can still contain a better neighbour. Points cannot be inserted or removed
//! after construction.
//!
//! Queries can trade accuracy for speed with an approximation factor `epsilon`: every returned
//! neighbour is then at most `1 + epsilon` times farther than the true one of the same rank.
//!
//! ### Box-decomposition trees
//!
//! A [`BbdTree`] recursively cuts the bounding box of the points with two kinds of nodes. Split
//! nodes cut a cell in two along an axis, like a kd-tree. Shrink nodes separate the points inside
//! a smaller box from the rest of the cell, which keeps the depth of the tree logarithmic however
//! the points are clustered. See [`BuildConfig`] for the available strategies.
//!
//! Searches are best-first: the cells are visited by increasing distance to the query using a
//! [`PriorityQueue`](queue::PriorityQueue). Four interchangeable queues are provided and can be
//! chosen per search with [`SearchConfig`].
//!
//! aknn uses [rayon](https://github.com/rayon-rs/rayon) to run batches of queries in parallel when
//! the `parallel` feature is enabled.
//!
//! ## Using aknn
//!
//! ### Building a tree
//!
//! Trees can be built from any rows of coordinates, from arrays, or from your own types
//! implementing [`Position`]. Implementations for vectors of `glam`, `nalgebra` and `ultraviolet`
//! are available with the corresponding features.
//!
//! ```
//! use aknn::prelude::*;
//!
//! #[derive(Position)]
//! struct City {
//!     name: &'static str,
//!     position: [f64; 2],
//! }
//!
//! let cities = [
//!     City { name: "Lyon", position: [45.76, 4.84] },
//!     City { name: "Paris", position: [48.86, 2.35] },
//!     City { name: "Marseille", position: [43.30, 5.37] },
//! ];
//!
//! let tree = BbdTree::from_positions(&cities, BuildConfig::default()).unwrap();
//! let nearest = tree.nearest([44.0, 5.0]).unwrap();
//! assert_eq!(cities[nearest.index].name, "Marseille");
//! ```
//!
//! ### Querying
//!
//! ```
//! use aknn::prelude::*;
//!
//! let points: Vec<[f32; 3]> = (0..1000)
//!     .map(|i| [i as f32, (i % 10) as f32, (i % 7) as f32])
//!     .collect();
//! let tree = BbdTree::from_coordinates(points, BuildConfig::default()).unwrap();
//!
//! // Exact search.
//! let exact = tree.k_nearest([500.0, 0.0, 3.0], 5).unwrap();
//! assert_eq!(exact[0].index, 500);
//!
//! // Approximate search, each neighbour at most 1.5 times farther than the exact one.
//! let approx = tree.k_nearest_approx([500.0, 0.0, 3.0], 5, 0.5).unwrap();
//! for (a, e) in approx.iter().zip(&exact) {
//!     assert!(a.distance <= 1.5 * e.distance);
//! }
//!
//! // Full control over the queues and the work of the search.
//! let config = SearchConfig::new(5)
//!     .with_queues(QueueKind::Heap, QueueKind::Fixed)
//!     .with_budget(Budget::MaxLeaves(100));
//! let result = tree.search([500.0, 0.0, 3.0], &config).unwrap();
//! assert!(result.complete);
//! ```

/// Error type of the crate.
pub mod error;

/// Configuration of the construction and the searches of a tree.
pub mod config;

/// Traits converting objects and vectors into coordinates.
pub mod position;

/// Priority queues used by the searches.
pub mod queue;

/// Statistics of a tree and of its searches.
pub mod stats;

/// BBD-tree nodes, cells and construction.
pub mod tree;

/// Tree storage.
pub mod storage;

/// Sequential searches.
pub mod sequential;

/// Parallel searches.
#[cfg(feature = "parallel")]
pub mod parallel;

pub use config::{Budget, BuildConfig, Decomposition, SearchConfig, SplitRule};
pub use error::{Error, Result};
pub use position::{Coordinates, Position};
pub use sequential::{linear_k_nearest, Neighbour, SearchResult};
pub use stats::{SearchStats, TreeStats};
pub use storage::BbdTree;
pub use tree::{BoundingBox, Scalar};

/// Commonly used types, re-exported.
pub mod prelude {
    // Common traits and their derive macros.
    pub use crate::{
        position::{Coordinates, Position},
        queue::{PriorityQueue, QueueKind},
        tree::Scalar,
    };
    pub use aknn_derive::Position;

    pub use crate::{
        config::{Budget, BuildConfig, Decomposition, SearchConfig, SplitRule},
        sequential::{linear_k_nearest, Neighbour, SearchResult},
        storage::BbdTree,
        Error,
    };
    #[cfg(feature = "parallel")]
    pub use rayon::prelude::*;
}

use crate::{
    config::{Budget, SearchConfig},
    queue::{FixedQueue, HeapQueue, LinearQueue, PriorityQueue, QueueKind, StdQueue},
    stats::SearchStats,
    storage::{is_finite, to_array, BbdTree},
    tree::{distance_squared, Node, NodeID, Scalar},
    Error, Result,
};

/// Point found by a search and its distance to the query.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Neighbour<S> {
    /// Index of the point in the input the tree was built from.
    pub index: usize,
    /// Euclidean distance between the point and the query.
    pub distance: S,
}

/// Outcome of a [`BbdTree::search`].
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<S> {
    /// Neighbours sorted by increasing distance.
    pub neighbours: Vec<Neighbour<S>>,
    /// Work done by the search.
    pub stats: SearchStats,
    /// `false` if the search was stopped by its [`Budget`], in which case the neighbours carry no
    /// distance guarantee.
    pub complete: bool,
}

/// Drains a queue of squared distances into neighbours sorted by increasing distance.
fn drain<S: Scalar, Q: PriorityQueue<S, usize>>(mut queue: Q) -> Vec<Neighbour<S>> {
    let mut neighbours = Vec::with_capacity(queue.len());
    while let Ok((distance, index)) = queue.pop() {
        neighbours.push(Neighbour {
            index,
            distance: distance.sqrt(),
        });
    }
    neighbours
}

impl<S: Scalar, const D: usize> BbdTree<S, D> {
    /// Returns the exact `k` nearest neighbours of the query, sorted by increasing distance.
    #[inline]
    pub fn k_nearest<Q: AsRef<[S]>>(&self, query: Q, k: usize) -> Result<Vec<Neighbour<S>>> {
        self.k_nearest_approx(query, k, S::ZERO)
    }

    /// Returns `k` approximate nearest neighbours of the query, sorted by increasing distance.
    ///
    /// The `i`-th returned neighbour is at most `1 + epsilon` times farther than the true `i`-th
    /// nearest neighbour.
    #[inline]
    pub fn k_nearest_approx<Q: AsRef<[S]>>(
        &self,
        query: Q,
        k: usize,
        epsilon: S,
    ) -> Result<Vec<Neighbour<S>>> {
        self.search_with::<HeapQueue<S, NodeID>, HeapQueue<S, usize>, _>(
            query,
            k,
            epsilon,
            Budget::Unlimited,
        )
        .map(|result| result.neighbours)
    }

    /// Returns the nearest neighbour of the query.
    #[inline]
    pub fn nearest<Q: AsRef<[S]>>(&self, query: Q) -> Result<Neighbour<S>> {
        self.nearest_approx(query, S::ZERO)
    }

    /// Returns a neighbour at most `1 + epsilon` times farther from the query than the nearest one.
    #[inline]
    pub fn nearest_approx<Q: AsRef<[S]>>(&self, query: Q, epsilon: S) -> Result<Neighbour<S>> {
        self.search_with::<HeapQueue<S, NodeID>, FixedQueue<S, usize>, _>(
            query,
            1,
            epsilon,
            Budget::Unlimited,
        )?
        .neighbours
        .into_iter()
        .next()
        .ok_or(Error::QueueEmpty)
    }

    /// Searches the neighbours of the query with the queues and budget of the configuration.
    pub fn search<Q: AsRef<[S]>>(
        &self,
        query: Q,
        config: &SearchConfig<S>,
    ) -> Result<SearchResult<S>> {
        macro_rules! with_results {
            ($candidates: ty) => {
                match config.results {
                    QueueKind::Fixed => self.search_with::<$candidates, FixedQueue<S, usize>, _>(
                        query,
                        config.k,
                        config.epsilon,
                        config.budget,
                    ),
                    QueueKind::Linear => self.search_with::<$candidates, LinearQueue<S, usize>, _>(
                        query,
                        config.k,
                        config.epsilon,
                        config.budget,
                    ),
                    QueueKind::Heap => self.search_with::<$candidates, HeapQueue<S, usize>, _>(
                        query,
                        config.k,
                        config.epsilon,
                        config.budget,
                    ),
                    QueueKind::Std => self.search_with::<$candidates, StdQueue<S, usize>, _>(
                        query,
                        config.k,
                        config.epsilon,
                        config.budget,
                    ),
                }
            };
        }

        match config.candidates {
            QueueKind::Fixed => with_results!(FixedQueue<S, NodeID>),
            QueueKind::Linear => with_results!(LinearQueue<S, NodeID>),
            QueueKind::Heap => with_results!(HeapQueue<S, NodeID>),
            QueueKind::Std => with_results!(StdQueue<S, NodeID>),
        }
    }

    /// Searches the neighbours of the query, ordering the nodes to visit with `C` and keeping the
    /// `k` best points in `R`.
    ///
    /// Nodes are visited by increasing distance between their cell and the query. The search
    /// stops once the closest remaining cell is more than `1 + epsilon` times farther than the
    /// current `k`-th neighbour, or when the budget runs out.
    #[tracing::instrument(level = "trace", skip(self, query))]
    pub fn search_with<C, R, Q>(
        &self,
        query: Q,
        k: usize,
        epsilon: S,
        budget: Budget,
    ) -> Result<SearchResult<S>>
    where
        C: PriorityQueue<S, NodeID>,
        R: PriorityQueue<S, usize>,
        Q: AsRef<[S]>,
    {
        let query = to_array::<S, D>(query.as_ref())?;
        if !is_finite(&query) {
            return Err(Error::NonFiniteQuery);
        }
        SearchConfig::new(k)
            .with_epsilon(epsilon)
            .validate(self.len())?;

        // Squared distances are compared against the squared bound.
        let factor = (S::ONE + epsilon) * (S::ONE + epsilon);

        let mut candidates = C::unbounded();
        let mut results = R::bounded(k);
        let mut stats = SearchStats::default();
        let mut complete = true;

        let pruned = |results: &R, distance: S| {
            results.is_full()
                && results
                    .last()
                    .is_ok_and(|(kth, _)| distance * factor > kth)
        };

        candidates.push(self.tree.data[0].distance_squared(&query), 0);

        while let Ok((distance, id)) = candidates.pop() {
            if pruned(&results, distance) {
                break;
            }

            if budget.is_exhausted(stats.leaves_visited) {
                complete = false;
                break;
            }

            stats.nodes_visited += 1;
            match self.tree.nodes[id as usize] {
                Node::Leaf { begin, end } => {
                    stats.leaves_visited += 1;
                    for &i in &self.index[begin..end] {
                        stats.points_examined += 1;
                        results.push(distance_squared(&self.points[i], &query), i);
                    }
                }
                Node::Split {
                    dim,
                    threshold,
                    left,
                    right,
                } => {
                    let (near, far) = if query[dim] <= threshold {
                        (left, right)
                    } else {
                        (right, left)
                    };

                    for child in [near, far].into_iter().flatten() {
                        let d = self.tree.data[child as usize].distance_squared(&query);
                        if !pruned(&results, d) {
                            candidates.push(d, child);
                        }
                    }
                }
                Node::Shrink { bbox, inner, outer } => {
                    let d = bbox.distance_squared(&query);
                    if !pruned(&results, d) {
                        candidates.push(d, inner);
                    }
                    if let Some(outer) = outer {
                        candidates.push(distance, outer);
                    }
                }
            }
        }

        self.counters.add(&stats);
        tracing::trace!(
            nodes = stats.nodes_visited,
            leaves = stats.leaves_visited,
            points = stats.points_examined,
            complete,
            "search finished"
        );

        Ok(SearchResult {
            neighbours: drain(results),
            stats,
            complete,
        })
    }
}

/// Returns the exact `k` nearest neighbours of the query among the points by comparing it with
/// every one of them.
///
/// ```
/// use aknn::linear_k_nearest;
///
/// let points = [[0.0, 0.0], [5.0, 5.0], [1.0, 1.0], [9.0, 0.0]];
/// let neighbours = linear_k_nearest(&points, [6.0, 6.0], 1).unwrap();
/// assert_eq!(neighbours[0].index, 1);
/// ```
pub fn linear_k_nearest<S, Q, const D: usize>(
    points: &[[S; D]],
    query: Q,
    k: usize,
) -> Result<Vec<Neighbour<S>>>
where
    S: Scalar,
    Q: AsRef<[S]>,
{
    let query = to_array::<S, D>(query.as_ref())?;
    if !is_finite(&query) {
        return Err(Error::NonFiniteQuery);
    }
    if k == 0 || k > points.len() {
        return Err(Error::InvalidK {
            k,
            len: points.len(),
        });
    }

    let mut results = HeapQueue::bounded(k);
    for (i, point) in points.iter().enumerate() {
        results.push(distance_squared(point, &query), i);
    }

    Ok(drain(results))
}

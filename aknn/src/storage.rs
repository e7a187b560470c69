use crate::{
    config::BuildConfig,
    position::{Coordinates, Position},
    stats::{AtomicStats, SearchStats, TreeStats},
    tree::{build::Builder, BbdNodes, BoundingBox, Node, NodeID, Scalar},
    Error, Result,
};

/// Box-decomposition tree over a static set of `D`-dimensional points.
///
/// The tree copies the points it is built from and answers exact and approximate nearest
/// neighbour queries with a best-first traversal of its cells, see
/// [`k_nearest`](Self::k_nearest) and [`search`](Self::search). Neighbours are identified by the
/// index of the point in the input it was built from.
///
/// Once built the tree is read-only, apart from the cumulative statistics of its searches, and
/// can be queried from multiple threads.
#[derive(Debug)]
pub struct BbdTree<S, const D: usize> {
    pub(crate) tree: BbdNodes<S, D>,
    pub(crate) points: Vec<[S; D]>,
    pub(crate) index: Vec<usize>,
    config: BuildConfig,
    pub(crate) counters: AtomicStats,
}

impl<S: Scalar, const D: usize> Clone for BbdTree<S, D> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
            points: self.points.clone(),
            index: self.index.clone(),
            config: self.config,
            counters: self.counters.clone(),
        }
    }
}

/// Converts a coordinate slice into an array of the dimension of the tree.
#[inline]
pub(crate) fn to_array<S: Scalar, const D: usize>(coordinates: &[S]) -> Result<[S; D]> {
    coordinates
        .try_into()
        .map_err(|_| Error::InvalidDimension {
            expected: D,
            found: coordinates.len(),
        })
}

/// Returns `true` if no coordinate of the point is infinite or NaN.
#[inline]
pub(crate) fn is_finite<S: Scalar, const D: usize>(point: &[S; D]) -> bool {
    point.iter().all(|&x| x.is_finite())
}

impl<S: Scalar, const D: usize> BbdTree<S, D> {
    /// Creates a new [`BbdTree`] from rows of coordinates, each of length `D`.
    ///
    /// # Example
    ///
    /// ```
    /// use aknn::{BbdTree, BuildConfig};
    ///
    /// let rows = vec![vec![0.0, 0.0], vec![5.0, 5.0], vec![1.0, 1.0], vec![9.0, 0.0]];
    /// let tree = BbdTree::<f64, 2>::new(&rows, BuildConfig::default().with_leaf_size(1)).unwrap();
    ///
    /// let neighbours = tree.k_nearest([0.0, 0.5], 2).unwrap();
    /// assert_eq!(neighbours[0].index, 0);
    /// assert_eq!(neighbours[1].index, 2);
    /// ```
    pub fn new<P: AsRef<[S]>>(points: &[P], config: BuildConfig) -> Result<Self> {
        let points = points
            .iter()
            .map(|p| to_array(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Self::from_coordinates(points, config)
    }

    /// Creates a new [`BbdTree`] from objects whose [`Position`] converts into coordinates.
    pub fn from_positions<P>(items: &[P], config: BuildConfig) -> Result<Self>
    where
        P: Position,
        P::Vector: Coordinates<S, D>,
    {
        Self::from_coordinates(
            items.iter().map(|p| p.position().coordinates()).collect(),
            config,
        )
    }

    /// Creates a new [`BbdTree`] taking ownership of the given coordinates.
    #[tracing::instrument(level = "debug", skip_all, fields(len = points.len(), dim = D))]
    pub fn from_coordinates(points: Vec<[S; D]>, config: BuildConfig) -> Result<Self> {
        config.validate()?;
        if points.is_empty() {
            return Err(Error::EmptyPointSet);
        }
        if let Some(index) = points.iter().position(|p| !is_finite(p)) {
            return Err(Error::NonFiniteCoordinate { index });
        }

        let mut index = (0..points.len()).collect::<Vec<_>>();
        let tree = Builder::new(&points, &mut index, &config).build();

        let result = Self {
            tree,
            points,
            index,
            config,
            counters: AtomicStats::default(),
        };

        let stats = result.tree_stats();
        tracing::debug!(
            nodes = result.node_count(),
            leaves = stats.leaf_nodes,
            splits = stats.split_nodes,
            shrinks = stats.shrink_nodes,
            depth = stats.max_depth,
            "built bbd-tree"
        );

        Ok(result)
    }

    /// Returns the number of points in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the tree holds no point, which never happens for a built tree.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the number of nodes in the tree.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    /// Returns the largest depth of a leaf, the root being at depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.tree_stats().max_depth
    }

    /// Returns the maximum number of points in a leaf the tree was built with.
    #[inline]
    pub const fn leaf_size(&self) -> usize {
        self.config.leaf_size
    }

    /// Returns the configuration the tree was built with.
    #[inline]
    pub const fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Returns the bounding box of all the points.
    #[inline]
    pub fn root_box(&self) -> BoundingBox<[S; D]> {
        self.tree.data[0]
    }

    /// Returns the node with the given id, the root being `0`.
    #[inline]
    pub fn node(&self, id: NodeID) -> Result<&Node<S, D>> {
        self.tree
            .nodes
            .get(id as usize)
            .ok_or(Error::IndexOutOfRange {
                index: id as usize,
                len: self.tree.len(),
            })
    }

    /// Returns the cell of the node with the given id.
    #[inline]
    pub fn cell(&self, id: NodeID) -> Result<&BoundingBox<[S; D]>> {
        self.tree
            .data
            .get(id as usize)
            .ok_or(Error::IndexOutOfRange {
                index: id as usize,
                len: self.tree.len(),
            })
    }

    /// Returns the coordinates of the point with the given index in the input order.
    #[inline]
    pub fn point(&self, index: usize) -> Result<&[S; D]> {
        self.points.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.points.len(),
        })
    }

    /// Returns the indices of the points of a leaf, or `None` for other nodes.
    #[inline]
    pub fn leaf_points(&self, id: NodeID) -> Result<Option<&[usize]>> {
        Ok(match *self.node(id)? {
            Node::Leaf { begin, end } => Some(&self.index[begin..end]),
            _ => None,
        })
    }

    /// Returns the cumulative statistics of the searches since the creation of the tree or the
    /// last call to [`reset_stats`](Self::reset_stats).
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.counters.load()
    }

    /// Resets the cumulative statistics of the searches.
    #[inline]
    pub fn reset_stats(&self) {
        self.counters.reset();
    }

    /// Computes the shape statistics of the tree.
    pub fn tree_stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        let mut depth_sum = 0;
        let mut stack = vec![(0 as NodeID, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let node = &self.tree.nodes[id as usize];
            match *node {
                Node::Leaf { begin, end } => {
                    stats.leaf_nodes += 1;
                    stats.max_depth = stats.max_depth.max(depth);
                    depth_sum += depth;
                    debug_assert!(end > begin);
                }
                Node::Split { .. } => stats.split_nodes += 1,
                Node::Shrink { .. } => stats.shrink_nodes += 1,
            }

            for child in node.children() {
                match child {
                    Some(child) => stack.push((child, depth + 1)),
                    None if !matches!(node, Node::Leaf { .. }) => stats.empty_children += 1,
                    None => {}
                }
            }
        }

        stats.inner_nodes = stats.split_nodes + stats.shrink_nodes;
        if stats.leaf_nodes != 0 {
            stats.avg_depth = depth_sum as f64 / stats.leaf_nodes as f64;
            stats.avg_leaf_size = self.len() as f64 / stats.leaf_nodes as f64;
        }
        stats.memory_bytes = self.tree.nodes.capacity() * std::mem::size_of::<Node<S, D>>()
            + self.tree.data.capacity() * std::mem::size_of::<BoundingBox<[S; D]>>()
            + self.index.capacity() * std::mem::size_of::<usize>()
            + self.points.capacity() * std::mem::size_of::<[S; D]>();

        stats
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{Decomposition, SplitRule};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    pub(crate) fn random_points<const D: usize>(n: usize, seed: u64) -> Vec<[f64; D]> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| std::array::from_fn(|_| rng.gen_range(-100.0..100.0)))
            .collect()
    }

    /// Points packed in a few small clusters.
    pub(crate) fn clustered_points<const D: usize>(n: usize, seed: u64) -> Vec<[f64; D]> {
        let mut rng = StdRng::seed_from_u64(seed);
        let centres = random_points::<D>(4, seed + 1);
        (0..n)
            .map(|i| {
                let c = centres[i % centres.len()];
                std::array::from_fn(|d| c[d] + rng.gen_range(-1e-3..1e-3))
            })
            .collect()
    }

    /// Points at exponentially decreasing distances from the origin.
    pub(crate) fn exponential_points(n: usize) -> Vec<[f64; 2]> {
        (0..n).map(|i| [0.5f64.powi(i as i32), 0.0]).collect()
    }

    pub(crate) fn configs() -> [BuildConfig; 4] {
        let config = BuildConfig::default().with_leaf_size(3);
        [
            config,
            config.with_split_rule(SplitRule::Fair),
            config.with_decomposition(Decomposition::Split),
            config
                .with_decomposition(Decomposition::Split)
                .with_split_rule(SplitRule::Fair),
        ]
    }

    fn check_invariants<const D: usize>(tree: &BbdTree<f64, D>) {
        let mut seen = vec![false; tree.len()];
        let mut stack = vec![0 as NodeID];

        while let Some(id) = stack.pop() {
            let cell = tree.cell(id).unwrap();
            let node = tree.node(id).unwrap();

            if let Some(points) = tree.leaf_points(id).unwrap() {
                assert!(!points.is_empty());
                assert!(
                    points.len() <= tree.leaf_size()
                        || points.windows(2).all(|w| tree.points[w[0]] == tree.points[w[1]])
                );
                for &i in points {
                    assert!(!seen[i], "point {i} in two leaves");
                    seen[i] = true;
                    assert!(cell.contains(tree.point(i).unwrap()));
                }
            }

            if let Node::Shrink { bbox, .. } = node {
                assert!(cell.contains_box(bbox));
            }

            for child in node.children().into_iter().flatten() {
                assert!(child > id);
                assert!(cell.contains_box(tree.cell(child).unwrap()));
                stack.push(child);
            }
        }

        assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn partition_and_containment() {
        for config in configs() {
            for n in [1, 2, 10, 1_000] {
                check_invariants(&BbdTree::from_coordinates(random_points::<1>(n, 1), config).unwrap());
                check_invariants(&BbdTree::from_coordinates(random_points::<2>(n, 2), config).unwrap());
                check_invariants(&BbdTree::from_coordinates(random_points::<8>(n, 3), config).unwrap());
                check_invariants(
                    &BbdTree::from_coordinates(clustered_points::<3>(n, 4), config).unwrap(),
                );
            }
            check_invariants(&BbdTree::from_coordinates(exponential_points(200), config).unwrap());
        }
    }

    #[test]
    fn duplicates() {
        let mut points = vec![[1.0, 1.0]; 25];
        points.extend(random_points::<2>(25, 5));
        points.extend(vec![[-3.0, 2.0]; 25]);

        for config in configs() {
            let tree = BbdTree::from_coordinates(points.clone(), config).unwrap();
            check_invariants(&tree);
        }
    }

    #[test]
    fn depth_is_logarithmic() {
        let bound = |n: usize| (n as f64).log(1.5).ceil() as usize + 1;
        let config = BuildConfig::default().with_leaf_size(1);

        for config in [config, config.with_split_rule(SplitRule::Fair)] {
            let clustered = BbdTree::from_coordinates(clustered_points::<2>(4_000, 6), config).unwrap();
            assert!(clustered.depth() <= bound(4_000), "{}", clustered.depth());

            let exponential = BbdTree::from_coordinates(exponential_points(500), config).unwrap();
            assert!(exponential.depth() <= bound(500), "{}", exponential.depth());
            assert!(exponential.tree_stats().shrink_nodes > 0);
        }
    }

    #[test]
    fn split_only_has_no_shrink() {
        let config = BuildConfig::default()
            .with_leaf_size(1)
            .with_decomposition(Decomposition::Split);
        let points = vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [100.0, 0.0]];
        let tree = BbdTree::from_coordinates(points, config).unwrap();
        let stats = tree.tree_stats();

        assert_eq!(stats.shrink_nodes, 0);
        assert!(stats.empty_children > 0);
        check_invariants(&tree);
    }

    #[test]
    fn tree_stats() {
        let tree = BbdTree::from_coordinates(random_points::<3>(1_000, 7), BuildConfig::default())
            .unwrap();
        let stats = tree.tree_stats();

        assert_eq!(stats.leaf_nodes + stats.inner_nodes, tree.node_count());
        assert_eq!(stats.inner_nodes, stats.split_nodes + stats.shrink_nodes);
        assert!(stats.avg_leaf_size <= tree.leaf_size() as f64);
        assert!(stats.avg_depth <= stats.max_depth as f64);
        assert!(stats.memory_bytes > 0);
        assert_eq!(tree.depth(), stats.max_depth);
    }

    #[test]
    fn single_point() {
        let tree = BbdTree::<f32, 3>::new(&[[1.0, 2.0, 3.0]], BuildConfig::default()).unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.depth(), 0);
        assert!(tree.root_box().is_degenerate());
        assert_eq!(tree.leaf_points(0), Ok(Some(&[0][..])));
    }

    #[test]
    fn non_finite_coordinates() {
        let config = BuildConfig::default().with_leaf_size(1);
        for config in [config, config.with_decomposition(Decomposition::Split)] {
            assert_eq!(
                BbdTree::from_coordinates(vec![[f64::INFINITY], [f64::NEG_INFINITY], [0.0]], config)
                    .unwrap_err(),
                Error::NonFiniteCoordinate { index: 0 }
            );
            assert_eq!(
                BbdTree::from_coordinates(vec![[0.0, 1.0], [2.0, 3.0], [4.0, f64::NAN]], config)
                    .unwrap_err(),
                Error::NonFiniteCoordinate { index: 2 }
            );
            assert_eq!(
                BbdTree::<f32, 2>::new(&[[1.0, f32::NEG_INFINITY]], config).unwrap_err(),
                Error::NonFiniteCoordinate { index: 0 }
            );
        }
    }

    #[test]
    fn extreme_coordinates() {
        let mut points = vec![[-1e308], [1e308]];
        points.extend((0..50).map(|i| [i as f64]));

        let config = BuildConfig::default().with_leaf_size(1);
        for config in [
            config,
            config.with_split_rule(SplitRule::Fair),
            config.with_decomposition(Decomposition::Split),
        ] {
            let tree = BbdTree::from_coordinates(points.clone(), config).unwrap();
            check_invariants(&tree);
            assert_eq!(tree.tree_stats().avg_leaf_size, 1.0);
        }
    }

    #[test]
    fn errors() {
        assert_eq!(
            BbdTree::<f64, 2>::new(&[vec![1.0, 2.0], vec![1.0]], BuildConfig::default())
                .unwrap_err(),
            Error::InvalidDimension {
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            BbdTree::<f64, 2>::from_coordinates(Vec::new(), BuildConfig::default()).unwrap_err(),
            Error::EmptyPointSet
        );
        assert_eq!(
            BbdTree::from_coordinates(vec![[0.0]], BuildConfig::default().with_leaf_size(0))
                .unwrap_err(),
            Error::InvalidLeafSize
        );

        let tree = BbdTree::from_coordinates(vec![[0.0]], BuildConfig::default()).unwrap();
        assert_eq!(
            tree.node(1).unwrap_err(),
            Error::IndexOutOfRange { index: 1, len: 1 }
        );
        assert_eq!(
            tree.point(3).unwrap_err(),
            Error::IndexOutOfRange { index: 3, len: 1 }
        );
    }
}

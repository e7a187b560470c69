use super::{BbdNodes, BoundingBox, MidPoint, MinMax, Node, NodeID, Scalar};
use crate::config::{BuildConfig, Decomposition, SplitRule};
use std::cmp::Ordering;

/// Recursive construction of the nodes of a BBD-tree over a permutation of points.
pub(crate) struct Builder<'a, S, const D: usize> {
    points: &'a [[S; D]],
    index: &'a mut [usize],
    config: &'a BuildConfig,
    nodes: BbdNodes<S, D>,
}

impl<'a, S: Scalar, const D: usize> Builder<'a, S, D> {
    pub(crate) fn new(points: &'a [[S; D]], index: &'a mut [usize], config: &'a BuildConfig) -> Self {
        Self {
            points,
            nodes: BbdNodes::with_capacity(2 * index.len() / config.leaf_size.max(1) + 1),
            index,
            config,
        }
    }

    /// Builds the whole tree, the root being the first node.
    pub(crate) fn build(mut self) -> BbdNodes<S, D> {
        let len = self.index.len();
        if len != 0 {
            let cell = self.points_box(0, len);
            self.build_node(0, len, cell);
        }
        self.nodes
    }

    fn push(&mut self, node: Node<S, D>, cell: BoundingBox<[S; D]>) -> NodeID {
        let id = self.nodes.nodes.len();
        self.nodes.nodes.push(node);
        self.nodes.data.push(cell);
        id as NodeID
    }

    /// Inserts the node holding `index[begin..end]` inside `cell` and its descendants.
    fn build_node(&mut self, begin: usize, end: usize, cell: BoundingBox<[S; D]>) -> NodeID {
        let id = self.push(Node::Leaf { begin, end }, cell);

        if end - begin <= self.config.leaf_size || self.coincident(begin, end) {
            return id;
        }

        let node = match self.config.decomposition {
            Decomposition::Split => self.split(begin, end, cell),
            Decomposition::SplitShrink => self.split_shrink(begin, end, cell),
        };

        if let Some(node) = node {
            self.nodes.nodes[id as usize] = node;
        }
        id
    }

    /// Cuts the cell once, allowing one side to be empty as long as the cell shrinks.
    fn split(&mut self, begin: usize, end: usize, cell: BoundingBox<[S; D]>) -> Option<Node<S, D>> {
        let (dim, threshold) = self.cut(begin, end, &cell);
        let mid = self.partition(begin, end, dim, threshold);
        let (left_cell, right_cell) = cell.split(dim, threshold);

        if (mid == begin && right_cell == cell) || (mid == end && left_cell == cell) {
            return None;
        }

        Some(Node::Split {
            dim,
            threshold,
            left: (mid > begin).then(|| self.build_node(begin, mid, left_cell)),
            right: (end > mid).then(|| self.build_node(mid, end, right_cell)),
        })
    }

    /// Shrinks the cell around the larger side of successive cuts until it holds at most the
    /// shrink fraction of the points.
    fn split_shrink(
        &mut self,
        begin: usize,
        end: usize,
        cell: BoundingBox<[S; D]>,
    ) -> Option<Node<S, D>> {
        let max_inner = self.config.shrink_fraction * (end - begin) as f64;

        let (mut lo, mut hi) = (begin, end);
        let mut inner = cell;
        let mut first = None;
        let mut splits = 0usize;

        while (hi - lo) as f64 > max_inner && hi - lo > self.config.leaf_size {
            if self.coincident(lo, hi) {
                break;
            }

            let (dim, threshold) = self.cut(lo, hi, &inner);
            let mid = self.partition(lo, hi, dim, threshold);
            let (left_cell, right_cell) = inner.split(dim, threshold);

            let (next_lo, next_hi, next_cell) = if mid - lo >= hi - mid {
                (lo, mid, left_cell)
            } else {
                (mid, hi, right_cell)
            };

            if next_hi - next_lo == hi - lo && next_cell == inner {
                break;
            }

            if splits == 0 {
                first = Some((dim, threshold, mid, left_cell, right_cell));
            }
            splits += 1;
            (lo, hi, inner) = (next_lo, next_hi, next_cell);
        }

        match (splits, first) {
            (0, _) | (_, None) => None,
            (1, Some((dim, threshold, mid, left_cell, right_cell))) => Some(Node::Split {
                dim,
                threshold,
                left: (mid > begin).then(|| self.build_node(begin, mid, left_cell)),
                right: (end > mid).then(|| self.build_node(mid, end, right_cell)),
            }),
            _ => {
                let inner_len = hi - lo;
                self.index[begin..hi].rotate_right(inner_len);
                let split = begin + inner_len;

                Some(Node::Shrink {
                    bbox: inner,
                    inner: self.build_node(begin, split, inner),
                    outer: (end > split).then(|| self.build_node(split, end, cell)),
                })
            }
        }
    }

    /// Returns the dimension and coordinate of the cut of `index[begin..end]` inside `cell`.
    fn cut(&mut self, begin: usize, end: usize, cell: &BoundingBox<[S; D]>) -> (usize, S) {
        match self.config.split_rule {
            SplitRule::Midpoint => {
                let dim = cell.longest_dimension();
                (dim, cell.min[dim].midpoint(cell.max[dim]))
            }
            SplitRule::Fair => self.fair_cut(begin, end, cell),
        }
    }

    fn fair_cut(&mut self, begin: usize, end: usize, cell: &BoundingBox<[S; D]>) -> (usize, S) {
        let size = cell.size();
        let longest = size.iter().copied().fold(S::ZERO, MinMax::max);
        let third = S::ONE / S::from_f64(3.0);

        let spread_box = self.points_box(begin, end);
        let spread = spread_box.size();

        let mut dim = cell.longest_dimension();
        for d in 0..D {
            if size[d] >= longest * third && spread[d] > spread[dim] {
                dim = d;
            }
        }

        let points = self.points;
        let median = (end - begin) / 2;
        self.index[begin..end].select_nth_unstable_by(median, |&a, &b| {
            points[a][dim]
                .partial_cmp(&points[b][dim])
                .unwrap_or(Ordering::Equal)
        });
        let median = points[self.index[begin + median]][dim];

        let other = (0..D)
            .filter(|&d| d != dim)
            .map(|d| size[d])
            .fold(S::ZERO, MinMax::max);
        let lo = cell.min[dim] + other * third;
        let hi = cell.max[dim] - other * third;

        let mut threshold = if lo <= hi {
            MinMax::min(MinMax::max(median, lo), hi)
        } else {
            cell.min[dim].midpoint(cell.max[dim])
        };

        if !(spread_box.min[dim] <= threshold && threshold < spread_box.max[dim]) {
            threshold = if spread[dim] > S::ZERO {
                spread_box.min[dim].midpoint(spread_box.max[dim])
            } else {
                cell.min[dim].midpoint(cell.max[dim])
            };
        }

        (dim, threshold)
    }

    /// Moves the points of `index[begin..end]` with `coordinate[dim] <= threshold` to the front
    /// and returns the position of the first other point.
    fn partition(&mut self, begin: usize, end: usize, dim: usize, threshold: S) -> usize {
        let (mut l, mut r) = (begin, end);
        while l < r {
            if self.points[self.index[l]][dim] <= threshold {
                l += 1;
            } else {
                r -= 1;
                self.index.swap(l, r);
            }
        }
        l
    }

    fn coincident(&self, begin: usize, end: usize) -> bool {
        let first = &self.points[self.index[begin]];
        self.index[begin + 1..end]
            .iter()
            .all(|&i| self.points[i] == *first)
    }

    fn points_box(&self, begin: usize, end: usize) -> BoundingBox<[S; D]> {
        BoundingBox::with(self.index[begin..end].iter().map(|&i| &self.points[i]))
    }
}

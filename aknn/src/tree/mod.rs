/// Bounding box related traits and types.
pub mod partition;

pub(crate) mod build;

pub use partition::*;

/// Index of a [`Node`] in a [`Tree`].
pub type NodeID = u32;

/// Generic tree data structure.
#[derive(Clone, Debug)]
pub struct Tree<Node, Data> {
    /// Vector of `Node` objects that define the structure of the tree.
    pub nodes: Vec<Node>,

    /// Vector of generic `Data` objects that contain information about the associated `Node`.
    ///
    /// The `data` vector is parallel to the `nodes` vector, so the `i`-th element of the `data`
    /// vector corresponds to the `i`-th element of the `nodes` vector.
    pub data: Vec<Data>,
}

impl<Node, Data> Tree<Node, Data> {
    /// Creates a new empty [`Tree`].
    #[inline]
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Creates a new empty [`Tree`] with at least the specified capacity in the `nodes` and
    /// `data` vectors.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            data: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of nodes in the [`Tree`].
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the [`Tree`] has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<Node, Data> Default for Tree<Node, Data> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Node of a BBD-tree.
///
/// The cell of every node is stored in the [`Tree::data`] vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node<S, const D: usize> {
    /// Node without children holding the points `index[begin..end]` of the tree permutation.
    Leaf {
        /// First position of the leaf in the permutation.
        begin: usize,
        /// Position after the last point of the leaf in the permutation.
        end: usize,
    },
    /// Node cutting its cell in two along an axis.
    ///
    /// Points with `coordinate[dim] <= threshold` belong to the left child. A child is `None`
    /// when its side holds no point.
    Split {
        /// Axis of the cut.
        dim: usize,
        /// Coordinate of the cut along `dim`.
        threshold: S,
        /// Child covering the lower side of the cut.
        left: Option<NodeID>,
        /// Child covering the upper side of the cut.
        right: Option<NodeID>,
    },
    /// Node separating the points inside a smaller box from the rest of its cell.
    Shrink {
        /// Inner box, the cell of the inner child.
        bbox: BoundingBox<[S; D]>,
        /// Child holding the points inside `bbox`.
        inner: NodeID,
        /// Child holding the remaining points, bounded by the cell of this node.
        outer: Option<NodeID>,
    },
}

/// Discriminant of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// [`Node::Leaf`].
    Leaf,
    /// [`Node::Split`].
    Split,
    /// [`Node::Shrink`].
    Shrink,
}

impl<S, const D: usize> Node<S, D> {
    /// Returns the kind of this [`Node`].
    #[inline]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Leaf { .. } => NodeKind::Leaf,
            Self::Split { .. } => NodeKind::Split,
            Self::Shrink { .. } => NodeKind::Shrink,
        }
    }

    /// Returns the two child slots of this [`Node`], both empty for a leaf.
    ///
    /// For a shrink node, the first slot is the inner child.
    #[inline]
    pub fn children(&self) -> [Option<NodeID>; 2] {
        match *self {
            Self::Leaf { .. } => [None, None],
            Self::Split { left, right, .. } => [left, right],
            Self::Shrink { inner, outer, .. } => [Some(inner), outer],
        }
    }
}

/// Arena holding the nodes of a BBD-tree and their cells.
pub type BbdNodes<S, const D: usize> = Tree<Node<S, D>, BoundingBox<[S; D]>>;

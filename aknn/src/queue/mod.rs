//! Priority queues driving the nearest-neighbour search.
//!
//! Every queue implements [`PriorityQueue`] and can optionally be bounded. A bounded queue that is
//! full keeps the smallest keys: an insertion evicts the current maximum when the new key is
//! smaller and is rejected otherwise.
//!
//! | Queue          | Push     | Pop      | First    | Last     |
//! |----------------|----------|----------|----------|----------|
//! | [`FixedQueue`] | O(n)     | O(1)     | O(1)     | O(1)     |
//! | [`LinearQueue`]| O(1)     | O(n)     | O(n)     | O(n)     |
//! | [`HeapQueue`]  | O(log n) | O(log n) | O(1)     | O(1)     |
//! | [`StdQueue`]   | O(log n) | O(log n) | O(1)     | O(n)     |

mod fixed;
mod heap;
mod linear;
mod std_heap;

pub use fixed::FixedQueue;
pub use heap::HeapQueue;
pub use linear::LinearQueue;
pub use std_heap::StdQueue;

use crate::Result;
use std::cmp::Ordering;

/// Collection of values ordered by a key, giving access to both its minimum and maximum.
///
/// Entries are not unique: equal keys are allowed and their relative order is unspecified.
pub trait PriorityQueue<K, V> {
    /// Creates an empty queue without a capacity.
    fn unbounded() -> Self
    where
        Self: Sized;

    /// Creates an empty queue holding at most `capacity` entries.
    fn bounded(capacity: usize) -> Self
    where
        Self: Sized;

    /// Returns the capacity of the queue, if any.
    fn limit(&self) -> Option<usize>;

    /// Returns the number of entries in the queue.
    fn len(&self) -> usize;

    /// Returns `true` if the queue has no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the queue is bounded and holds as many entries as its capacity.
    #[inline]
    fn is_full(&self) -> bool {
        self.limit().is_some_and(|limit| self.len() >= limit)
    }

    /// Inserts an entry and returns `true` if it was kept.
    ///
    /// When the queue is full, the entry with the largest key is evicted if `key` is smaller than
    /// it, otherwise the new entry is rejected.
    fn push(&mut self, key: K, value: V) -> bool;

    /// Removes and returns the entry with the smallest key.
    fn pop(&mut self) -> Result<(K, V)>;

    /// Returns the entry with the smallest key.
    fn first(&self) -> Result<(K, &V)>;

    /// Returns the entry with the largest key.
    fn last(&self) -> Result<(K, &V)>;

    /// Returns a copy of the entries in an unspecified order.
    fn values(&self) -> Vec<(K, V)>
    where
        V: Clone;

    /// Removes every entry, keeping the capacity.
    fn clear(&mut self);
}

/// Variants of [`PriorityQueue`] that can be selected at runtime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueueKind {
    /// [`FixedQueue`].
    Fixed,
    /// [`LinearQueue`].
    Linear,
    /// [`HeapQueue`].
    #[default]
    Heap,
    /// [`StdQueue`].
    Std,
}

/// Key and value pair stored in a queue, compared by key only.
#[derive(Clone, Copy, Debug)]
pub struct Entry<K, V> {
    /// Priority of the entry.
    pub key: K,
    /// Payload of the entry.
    pub value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates a new [`Entry`].
    #[inline]
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K: PartialOrd, V> PartialEq for Entry<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: PartialOrd, V> Eq for Entry<K, V> {}

impl<K: PartialOrd, V> PartialOrd for Entry<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd, V> Ord for Entry<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .partial_cmp(&other.key)
            .unwrap_or(Ordering::Equal)
    }
}

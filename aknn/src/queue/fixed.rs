use super::{Entry, PriorityQueue};
use crate::{Error, Result};

/// [`PriorityQueue`] stored as an array sorted by descending key.
///
/// The minimum sits at the end of the array, making [`pop`](PriorityQueue::pop) and both peeks
/// O(1) while insertions shift up to `n` entries. Best suited to small bounded queues such as the
/// `k` results of a search.
#[derive(Clone, Debug)]
pub struct FixedQueue<K, V> {
    entries: Vec<Entry<K, V>>,
    limit: Option<usize>,
}

impl<K, V> Default for FixedQueue<K, V> {
    #[inline]
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            limit: None,
        }
    }
}

impl<K: PartialOrd + Copy, V> PriorityQueue<K, V> for FixedQueue<K, V> {
    #[inline]
    fn unbounded() -> Self {
        Self::default()
    }

    #[inline]
    fn bounded(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            limit: Some(capacity),
        }
    }

    #[inline]
    fn limit(&self) -> Option<usize> {
        self.limit
    }

    #[inline]
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn push(&mut self, key: K, value: V) -> bool {
        if self.is_full() {
            if !self.entries.first().is_some_and(|max| key < max.key) {
                return false;
            }
            self.entries.remove(0);
        }

        let at = self.entries.partition_point(|e| e.key > key);
        self.entries.insert(at, Entry::new(key, value));
        true
    }

    #[inline]
    fn pop(&mut self) -> Result<(K, V)> {
        self.entries
            .pop()
            .map(|e| (e.key, e.value))
            .ok_or(Error::QueueEmpty)
    }

    #[inline]
    fn first(&self) -> Result<(K, &V)> {
        self.entries
            .last()
            .map(|e| (e.key, &e.value))
            .ok_or(Error::QueueEmpty)
    }

    #[inline]
    fn last(&self) -> Result<(K, &V)> {
        self.entries
            .first()
            .map(|e| (e.key, &e.value))
            .ok_or(Error::QueueEmpty)
    }

    fn values(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.entries
            .iter()
            .map(|e| (e.key, e.value.clone()))
            .collect()
    }

    #[inline]
    fn clear(&mut self) {
        self.entries.clear();
    }
}

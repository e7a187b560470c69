use super::{Entry, PriorityQueue};
use crate::{Error, Result};
use std::{cmp::Reverse, collections::BinaryHeap};

/// [`PriorityQueue`] backed by [`BinaryHeap`].
///
/// The standard heap only exposes its maximum, so entries are stored reversed and the largest key
/// is found by a linear scan. Evicting it rebuilds the heap.
#[derive(Clone, Debug)]
pub struct StdQueue<K, V> {
    heap: BinaryHeap<Reverse<Entry<K, V>>>,
    limit: Option<usize>,
}

impl<K: PartialOrd, V> Default for StdQueue<K, V> {
    #[inline]
    fn default() -> Self {
        Self {
            heap: BinaryHeap::new(),
            limit: None,
        }
    }
}

impl<K: PartialOrd, V> StdQueue<K, V> {
    fn max(&self) -> Option<&Entry<K, V>> {
        self.heap.iter().map(|Reverse(e)| e).max()
    }
}

impl<K: PartialOrd + Copy, V> PriorityQueue<K, V> for StdQueue<K, V> {
    #[inline]
    fn unbounded() -> Self {
        Self::default()
    }

    #[inline]
    fn bounded(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            limit: Some(capacity),
        }
    }

    #[inline]
    fn limit(&self) -> Option<usize> {
        self.limit
    }

    #[inline]
    fn len(&self) -> usize {
        self.heap.len()
    }

    fn push(&mut self, key: K, value: V) -> bool {
        if self.is_full() {
            if !self.max().is_some_and(|max| key < max.key) {
                return false;
            }

            let mut entries = std::mem::take(&mut self.heap).into_vec();
            if let Some(i) = (0..entries.len()).reduce(|a, b| {
                if entries[b].0 > entries[a].0 {
                    b
                } else {
                    a
                }
            }) {
                entries.swap_remove(i);
            }
            self.heap = BinaryHeap::from(entries);
        }

        self.heap.push(Reverse(Entry::new(key, value)));
        true
    }

    #[inline]
    fn pop(&mut self) -> Result<(K, V)> {
        self.heap
            .pop()
            .map(|Reverse(e)| (e.key, e.value))
            .ok_or(Error::QueueEmpty)
    }

    #[inline]
    fn first(&self) -> Result<(K, &V)> {
        self.heap
            .peek()
            .map(|Reverse(e)| (e.key, &e.value))
            .ok_or(Error::QueueEmpty)
    }

    #[inline]
    fn last(&self) -> Result<(K, &V)> {
        self.max()
            .map(|e| (e.key, &e.value))
            .ok_or(Error::QueueEmpty)
    }

    fn values(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.heap
            .iter()
            .map(|Reverse(e)| (e.key, e.value.clone()))
            .collect()
    }

    #[inline]
    fn clear(&mut self) {
        self.heap.clear();
    }
}

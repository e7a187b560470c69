use super::{Entry, PriorityQueue};
use crate::{Error, Result};

/// [`PriorityQueue`] stored as an unsorted array.
///
/// Insertions are O(1) and every other operation scans the whole array.
#[derive(Clone, Debug)]
pub struct LinearQueue<K, V> {
    entries: Vec<Entry<K, V>>,
    limit: Option<usize>,
}

impl<K, V> Default for LinearQueue<K, V> {
    #[inline]
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            limit: None,
        }
    }
}

impl<K: PartialOrd, V> LinearQueue<K, V> {
    fn min_index(&self) -> Option<usize> {
        (0..self.entries.len()).reduce(|a, b| {
            if self.entries[b].key < self.entries[a].key {
                b
            } else {
                a
            }
        })
    }

    fn max_index(&self) -> Option<usize> {
        (0..self.entries.len()).reduce(|a, b| {
            if self.entries[b].key > self.entries[a].key {
                b
            } else {
                a
            }
        })
    }
}

impl<K: PartialOrd + Copy, V> PriorityQueue<K, V> for LinearQueue<K, V> {
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
            match self.max_index() {
                Some(max) if key < self.entries[max].key => {
                    self.entries.swap_remove(max);
                }
                _ => return false,
            }
        }

        self.entries.push(Entry::new(key, value));
        true
    }

    fn pop(&mut self) -> Result<(K, V)> {
        let min = self.min_index().ok_or(Error::QueueEmpty)?;
        let entry = self.entries.swap_remove(min);
        Ok((entry.key, entry.value))
    }

    fn first(&self) -> Result<(K, &V)> {
        let min = self.min_index().ok_or(Error::QueueEmpty)?;
        Ok((self.entries[min].key, &self.entries[min].value))
    }

    fn last(&self) -> Result<(K, &V)> {
        let max = self.max_index().ok_or(Error::QueueEmpty)?;
        Ok((self.entries[max].key, &self.entries[max].value))
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

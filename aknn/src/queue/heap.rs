use super::{Entry, PriorityQueue};
use crate::{Error, Result};

/// [`PriorityQueue`] stored as a min-max heap.
///
/// Nodes on even levels are smaller than all of their descendants and nodes on odd levels are
/// greater than all of their descendants, so the minimum is the root and the maximum is one of its
/// two children. Insertion, removal of either end and eviction are O(log n).
#[derive(Clone, Debug)]
pub struct HeapQueue<K, V> {
    heap: Vec<Entry<K, V>>,
    limit: Option<usize>,
}

impl<K, V> Default for HeapQueue<K, V> {
    #[inline]
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            limit: None,
        }
    }
}

#[inline]
fn is_min_level(i: usize) -> bool {
    (usize::BITS - (i + 1).leading_zeros() - 1) % 2 == 0
}

#[inline]
const fn parent(i: usize) -> usize {
    (i - 1) / 2
}

impl<K: PartialOrd + Copy, V> HeapQueue<K, V> {
    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.heap[a].key < self.heap[b].key
    }

    fn max_index(&self) -> Option<usize> {
        match self.heap.len() {
            0 => None,
            1 => Some(0),
            2 => Some(1),
            _ => Some(if self.less(1, 2) { 2 } else { 1 }),
        }
    }

    fn bubble_up(&mut self, i: usize) {
        if i == 0 {
            return;
        }

        let p = parent(i);
        if is_min_level(i) {
            if self.less(p, i) {
                self.heap.swap(i, p);
                self.bubble_up_with(p, false);
            } else {
                self.bubble_up_with(i, true);
            }
        } else if self.less(i, p) {
            self.heap.swap(i, p);
            self.bubble_up_with(p, true);
        } else {
            self.bubble_up_with(i, false);
        }
    }

    /// Moves the entry at `i` up through its grandparents, on min levels if `min` is `true`.
    fn bubble_up_with(&mut self, mut i: usize, min: bool) {
        while i > 2 {
            let grandparent = parent(parent(i));
            let swap = if min {
                self.less(i, grandparent)
            } else {
                self.less(grandparent, i)
            };

            if !swap {
                break;
            }
            self.heap.swap(i, grandparent);
            i = grandparent;
        }
    }

    /// Returns the smallest (or largest if `min` is `false`) child or grandchild of `i`.
    fn extreme_descendant(&self, i: usize, min: bool) -> Option<usize> {
        let len = self.heap.len();
        [2 * i + 1, 2 * i + 2, 4 * i + 3, 4 * i + 4, 4 * i + 5, 4 * i + 6]
            .into_iter()
            .filter(|&d| d < len)
            .reduce(|a, b| {
                let better = if min { self.less(b, a) } else { self.less(a, b) };
                if better {
                    b
                } else {
                    a
                }
            })
    }

    fn trickle_down(&mut self, mut i: usize) {
        let min = is_min_level(i);
        while let Some(m) = self.extreme_descendant(i, min) {
            let swap = if min { self.less(m, i) } else { self.less(i, m) };
            if !swap {
                break;
            }
            self.heap.swap(m, i);

            if m <= 2 * i + 2 {
                break;
            }

            let p = parent(m);
            let misplaced = if min { self.less(p, m) } else { self.less(m, p) };
            if misplaced {
                self.heap.swap(m, p);
            }
            i = m;
        }
    }

    fn remove(&mut self, i: usize) -> Entry<K, V> {
        let entry = self.heap.swap_remove(i);
        if i < self.heap.len() {
            self.trickle_down(i);
        }
        entry
    }
}

impl<K: PartialOrd + Copy, V> PriorityQueue<K, V> for HeapQueue<K, V> {
    #[inline]
    fn unbounded() -> Self {
        Self::default()
    }

    #[inline]
    fn bounded(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
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
            match self.max_index() {
                Some(max) if key < self.heap[max].key => {
                    self.remove(max);
                }
                _ => return false,
            }
        }

        self.heap.push(Entry::new(key, value));
        self.bubble_up(self.heap.len() - 1);
        true
    }

    #[inline]
    fn pop(&mut self) -> Result<(K, V)> {
        if self.heap.is_empty() {
            return Err(Error::QueueEmpty);
        }

        let entry = self.remove(0);
        Ok((entry.key, entry.value))
    }

    #[inline]
    fn first(&self) -> Result<(K, &V)> {
        self.heap
            .first()
            .map(|e| (e.key, &e.value))
            .ok_or(Error::QueueEmpty)
    }

    #[inline]
    fn last(&self) -> Result<(K, &V)> {
        let max = self.max_index().ok_or(Error::QueueEmpty)?;
        Ok((self.heap[max].key, &self.heap[max].value))
    }

    fn values(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.heap.iter().map(|e| (e.key, e.value.clone())).collect()
    }

    #[inline]
    fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        assert!(is_min_level(0));
        assert!(!is_min_level(1) && !is_min_level(2));
        assert!((3..7).all(is_min_level));
        assert!((7..15).all(|i| !is_min_level(i)));
    }

    fn check_order<K: PartialOrd + Copy, V>(queue: &HeapQueue<K, V>) {
        for i in 1..queue.heap.len() {
            let mut a = parent(i);
            loop {
                if is_min_level(a) {
                    assert!(!queue.less(i, a));
                } else {
                    assert!(!queue.less(a, i));
                }
                if a == 0 {
                    break;
                }
                a = parent(a);
            }
        }
    }

    #[test]
    fn keeps_min_max_order() {
        let mut queue = HeapQueue::unbounded();
        for i in 0..200u32 {
            queue.push((i * 7919 % 211) as f64, i);
            check_order(&queue);
        }

        while queue.len() > 100 {
            let max = queue.max_index().unwrap();
            queue.remove(max);
            check_order(&queue);
        }

        while !queue.is_empty() {
            queue.pop().unwrap();
            check_order(&queue);
        }
    }
}

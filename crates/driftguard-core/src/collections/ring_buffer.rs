//! Fixed-capacity FIFO buffer: append-only, oldest evicted first.

use std::collections::VecDeque;

/// A bounded, time-ordered buffer.
///
/// Index 0 is the oldest retained item. Pushing into a full buffer evicts the
/// oldest item and returns it. Items are never mutated in place.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
    total_pushed: u64,
}

impl<T> RingBuffer<T> {
    /// Create an empty buffer. A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            total_pushed: 0,
        }
    }

    /// Append an item, returning the evicted oldest item if the buffer was full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        self.total_pushed += 1;
        evicted
    }

    /// Item at `index`, where 0 is the oldest retained item.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Most recently pushed item.
    pub fn latest(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items ever pushed, including evicted ones.
    pub fn total_pushed(&self) -> u64 {
        self.total_pushed
    }

    /// Iterate oldest → newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// Iterate over the newest `n` items, in chronological order.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &T> {
        let skip = self.items.len().saturating_sub(n);
        self.items.iter().skip(skip)
    }

    /// Drop all items. The lifetime push counter is kept.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Clone the newest `n` items, in chronological order.
    pub fn tail_vec(&self, n: usize) -> Vec<T> {
        self.tail(n).cloned().collect()
    }
}

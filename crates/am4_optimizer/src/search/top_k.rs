use std::{cmp::Reverse, collections::BinaryHeap};

/// Keeps the `k` greatest items offered to it. The smallest kept item sits at
/// the top of a min-heap, so an offer costs `O(log k)`.
#[derive(Debug, Clone)]
pub struct TopK<T: Ord> {
    capacity: usize,
    heap: BinaryHeap<Reverse<T>>,
}

impl<T: Ord> TopK<T> {
    pub fn new(capacity: usize) -> Self {
        TopK {
            capacity,
            heap: BinaryHeap::with_capacity(capacity.saturating_add(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Whether `item` would be kept if offered now.
    pub fn accepts(&self, item: &T) -> bool {
        if self.heap.len() < self.capacity {
            return self.capacity > 0;
        }
        self.heap.peek().is_some_and(|Reverse(min)| item > min)
    }

    pub fn offer(&mut self, item: T) {
        if !self.accepts(&item) {
            return;
        }
        if self.heap.len() == self.capacity {
            self.heap.pop();
        }
        self.heap.push(Reverse(item));
    }

    pub fn merge(mut self, other: TopK<T>) -> Self {
        for Reverse(item) in other.heap {
            self.offer(item);
        }
        self
    }

    /// Kept items, greatest first.
    pub fn into_sorted_vec(self) -> Vec<T> {
        // ascending order of `Reverse` is descending order of `T`
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(item)| item)
            .collect()
    }
}

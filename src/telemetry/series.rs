//! # Bounded Series
//!
//! Fixed-capacity FIFO storage for a single telemetry channel.

use std::collections::VecDeque;

/// A fixed-capacity sequence that evicts its oldest element on overflow.
#[derive(Debug, Clone)]
pub struct BoundedSeries<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T: Copy> BoundedSeries<T> {
    /// Creates an empty series. A capacity of 0 is raised to 1.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a value, returning the evicted oldest value if the series was full.
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(value);
        evicted
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Copies the contents, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_below_capacity() {
        let mut series = BoundedSeries::with_capacity(3);
        assert_eq!(series.push(1), None);
        assert_eq!(series.push(2), None);
        assert_eq!(series.to_vec(), vec![1, 2]);
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut series = BoundedSeries::with_capacity(3);
        for v in 1..=3 {
            series.push(v);
        }
        assert_eq!(series.push(4), Some(1));
        assert_eq!(series.push(5), Some(2));
        assert_eq!(series.to_vec(), vec![3, 4, 5]);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut series = BoundedSeries::with_capacity(0);
        assert_eq!(series.capacity(), 1);
        series.push(true);
        series.push(false);
        assert_eq!(series.to_vec(), vec![false]);
    }

    #[test]
    fn test_clear() {
        let mut series = BoundedSeries::with_capacity(2);
        series.push(1.0);
        series.clear();
        assert!(series.is_empty());
        assert_eq!(series.capacity(), 2);
    }
}

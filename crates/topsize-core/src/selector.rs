//! Bounded top-N selection.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::path::{Path, PathBuf};

use crate::entry::Entry;
use crate::error::ScanError;

/// Keeps the `capacity` largest entries observed so far.
///
/// The frontier is a binary heap whose root is the entry that would be
/// evicted next: the smallest size, and among equal smallest sizes the most
/// recently observed one. `observe` is `O(log capacity)` and memory stays at
/// `O(capacity)` no matter how many entries are fed in.
///
/// # Tie-break policy
///
/// Earliest observed wins. A candidate whose size equals the current
/// minimum never replaces it, and [`Selector::results`] orders equal sizes
/// by observation order. For a fixed input sequence the output is therefore
/// fully deterministic.
#[derive(Debug, Clone)]
pub struct Selector {
    capacity: usize,
    heap: BinaryHeap<Slot>,
    observed: u64,
}

impl Selector {
    /// Create an empty selector that keeps at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self, ScanError> {
        if capacity == 0 {
            return Err(ScanError::invalid_config("capacity must be at least 1"));
        }
        Ok(Self {
            capacity,
            heap: BinaryHeap::with_capacity(capacity),
            observed: 0,
        })
    }

    /// Offer a candidate entry.
    ///
    /// Never fails; zero sizes and empty paths are accepted like any other.
    /// The path is only copied when the candidate is admitted.
    pub fn observe(&mut self, path: impl AsRef<Path>, size: u64) {
        let seq = self.observed;
        self.observed += 1;

        if self.heap.len() < self.capacity {
            self.heap.push(Slot::new(path.as_ref().to_path_buf(), size, seq));
            return;
        }

        if let Some(mut smallest) = self.heap.peek_mut() {
            if size > smallest.entry.size {
                // Overwriting through `PeekMut` restores the heap on drop.
                *smallest = Slot::new(path.as_ref().to_path_buf(), size, seq);
            }
        }
    }

    /// Held entries sorted by size descending, ties in observation order.
    pub fn results(&self) -> Vec<Entry> {
        let mut slots: Vec<&Slot> = self.heap.iter().collect();
        slots.sort_by(|a, b| b.entry.size.cmp(&a.entry.size).then(a.seq.cmp(&b.seq)));
        slots.into_iter().map(|slot| slot.entry.clone()).collect()
    }

    /// Consume the selector, returning its sorted results.
    pub fn into_results(self) -> Vec<Entry> {
        let mut slots = self.heap.into_vec();
        slots.sort_by(|a, b| b.entry.size.cmp(&a.entry.size).then(a.seq.cmp(&b.seq)));
        slots.into_iter().map(|slot| slot.entry).collect()
    }

    /// Maximum number of entries retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether nothing has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of `observe` calls so far.
    pub fn observed(&self) -> u64 {
        self.observed
    }

    /// Size a candidate must exceed to get in, once the frontier is full.
    pub fn min_size(&self) -> Option<u64> {
        if self.heap.len() < self.capacity {
            return None;
        }
        self.heap.peek().map(|slot| slot.entry.size)
    }
}

/// Heap slot: an entry plus the order in which it was observed.
#[derive(Debug, Clone)]
struct Slot {
    entry: Entry,
    seq: u64,
}

impl Slot {
    fn new(path: PathBuf, size: u64, seq: u64) -> Self {
        Self {
            entry: Entry { path, size },
            seq,
        }
    }
}

// `BinaryHeap` is a max-heap, so "greater" means "evicted first": smaller
// size, then later observation.
impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .entry
            .size
            .cmp(&self.entry.size)
            .then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Slot {}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(selector: &Selector) -> Vec<(String, u64)> {
        selector
            .results()
            .into_iter()
            .map(|e| (e.path.to_string_lossy().into_owned(), e.size))
            .collect()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = Selector::new(0).unwrap_err();
        assert!(matches!(err, ScanError::InvalidConfig { .. }));
    }

    #[test]
    fn test_keeps_three_largest() {
        let mut selector = Selector::new(3).unwrap();
        for (path, size) in [("a", 10), ("b", 5), ("c", 20), ("d", 1), ("e", 15)] {
            selector.observe(path, size);
        }

        assert_eq!(
            pairs(&selector),
            vec![("c".into(), 20), ("e".into(), 15), ("a".into(), 10)]
        );
    }

    #[test]
    fn test_fewer_observations_than_capacity() {
        let mut selector = Selector::new(10).unwrap();
        selector.observe("x", 3);
        selector.observe("y", 7);

        assert_eq!(selector.len(), 2);
        assert_eq!(selector.min_size(), None);
        assert_eq!(pairs(&selector), vec![("y".into(), 7), ("x".into(), 3)]);
    }

    #[test]
    fn test_equal_size_does_not_replace() {
        let mut selector = Selector::new(1).unwrap();
        selector.observe("first", 100);
        selector.observe("second", 100);
        selector.observe("smaller", 99);

        assert_eq!(pairs(&selector), vec![("first".into(), 100)]);

        selector.observe("bigger", 101);
        assert_eq!(pairs(&selector), vec![("bigger".into(), 101)]);
    }

    #[test]
    fn test_ties_ordered_by_observation() {
        let mut selector = Selector::new(4).unwrap();
        selector.observe("p", 5);
        selector.observe("q", 9);
        selector.observe("r", 5);
        selector.observe("s", 5);

        assert_eq!(
            pairs(&selector),
            vec![
                ("q".into(), 9),
                ("p".into(), 5),
                ("r".into(), 5),
                ("s".into(), 5)
            ]
        );
    }

    #[test]
    fn test_eviction_drops_latest_of_tied_minimum() {
        let mut selector = Selector::new(3).unwrap();
        selector.observe("old", 5);
        selector.observe("young", 5);
        selector.observe("big", 50);
        selector.observe("bigger", 60);

        // "young" was observed after "old", so it loses the tie.
        assert_eq!(
            pairs(&selector),
            vec![("bigger".into(), 60), ("big".into(), 50), ("old".into(), 5)]
        );
    }

    #[test]
    fn test_results_is_idempotent() {
        let mut selector = Selector::new(2).unwrap();
        selector.observe("a", 1);
        selector.observe("b", 2);
        selector.observe("c", 3);

        assert_eq!(selector.results(), selector.results());
        assert_eq!(selector.results(), selector.clone().into_results());
    }

    #[test]
    fn test_accepts_zero_size_and_empty_path() {
        let mut selector = Selector::new(2).unwrap();
        selector.observe("", 0);

        assert_eq!(selector.results(), vec![Entry::new("", 0)]);
        assert_eq!(selector.observed(), 1);
    }

    #[test]
    fn test_min_size_tracks_threshold() {
        let mut selector = Selector::new(2).unwrap();
        selector.observe("a", 8);
        selector.observe("b", 4);
        assert_eq!(selector.min_size(), Some(4));

        selector.observe("c", 6);
        assert_eq!(selector.min_size(), Some(6));
    }
}

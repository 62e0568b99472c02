//! Max-heap of records ordered by view count
//!
//! This index is a consumable view: [`PriorityIndex::pop_max`] removes the
//! entry for good, while the point and range indexes keep every record.

use crate::core::record::RecordId;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ranked {
    views: u64,
    id: RecordId,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        // Ties go to the earlier insertion; callers must not rely on it.
        self.views
            .cmp(&other.views)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary heap with the highest view count at the root
#[derive(Debug, Default)]
pub struct PriorityIndex {
    heap: BinaryHeap<Ranked>,
}

impl PriorityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, views: u64, id: RecordId) {
        self.heap.push(Ranked { views, id });
    }

    /// Remove and return the handle with the most views
    pub fn pop_max(&mut self) -> Option<RecordId> {
        self.heap.pop().map(|ranked| ranked.id)
    }

    /// Handle with the most views, left in place
    pub fn peek_max(&self) -> Option<RecordId> {
        self.heap.peek().map(|ranked| ranked.id)
    }

    /// Entries not yet extracted
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

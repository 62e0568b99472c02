//! Ordered index for time-range queries

use crate::core::record::RecordId;
use crate::core::temporal::{Timestamp, YearMonth};
use std::collections::BTreeMap;

/// Ordered timestamp index
///
/// Records sharing a timestamp are all kept, in insertion order.
#[derive(Debug)]
pub struct RangeIndex {
    /// Map from timestamp to record handles
    time_index: BTreeMap<Timestamp, Vec<RecordId>>,
    len: usize,
}

impl RangeIndex {
    pub fn new() -> Self {
        Self {
            time_index: BTreeMap::new(),
            len: 0,
        }
    }

    pub fn insert(&mut self, timestamp: Timestamp, id: RecordId) {
        self.time_index.entry(timestamp).or_default().push(id);
        self.len += 1;
    }

    /// Handles with `start <= timestamp <= end`, ascending
    ///
    /// Reversed bounds select nothing.
    pub fn range(&self, start: Timestamp, end: Timestamp) -> Vec<RecordId> {
        if start > end {
            return Vec::new();
        }
        self.time_index
            .range(start..=end)
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect()
    }

    /// Handles from the first second of `start` to the last second of `end`
    pub fn range_by_month(&self, start: &YearMonth, end: &YearMonth) -> Vec<RecordId> {
        self.range(start.first_instant(), end.last_instant())
    }

    /// Every handle, ascending by timestamp
    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.time_index.values().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for RangeIndex {
    fn default() -> Self {
        Self::new()
    }
}

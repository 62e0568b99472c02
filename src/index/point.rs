//! Exact-match index from timestamp to record

use crate::core::record::RecordId;
use crate::core::temporal::Timestamp;
use ahash::RandomState;
use hashbrown::HashMap;

/// Hash index keyed by timestamp; the latest `put` for a timestamp wins
#[derive(Debug)]
pub struct PointIndex {
    entries: HashMap<Timestamp, RecordId, RandomState>,
}

impl PointIndex {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Associate `id` with `timestamp`, returning the handle it displaced
    pub fn put(&mut self, timestamp: Timestamp, id: RecordId) -> Option<RecordId> {
        self.entries.insert(timestamp, id)
    }

    pub fn get(&self, timestamp: Timestamp) -> Option<RecordId> {
        self.entries.get(&timestamp).copied()
    }

    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.entries.contains_key(&timestamp)
    }

    /// Number of distinct timestamps
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PointIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut index = PointIndex::new();
        let t1 = Timestamp::parse("2024-01-01 08:00:00").unwrap();
        let t2 = Timestamp::parse("2024-01-01 09:00:00").unwrap();

        assert_eq!(index.put(t1, RecordId::new(0)), None);
        assert_eq!(index.put(t2, RecordId::new(1)), None);

        assert_eq!(index.get(t1), Some(RecordId::new(0)));
        assert_eq!(index.get(t2), Some(RecordId::new(1)));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_missing_timestamp_is_none() {
        let index = PointIndex::default();
        let t = Timestamp::parse("2024-01-01 08:00:00").unwrap();
        assert!(index.is_empty());
        assert_eq!(index.get(t), None);
        assert!(!index.contains(t));
    }

    #[test]
    fn test_last_write_wins() {
        let mut index = PointIndex::with_capacity(4);
        let t = Timestamp::parse("2024-06-15 18:45:00").unwrap();

        index.put(t, RecordId::new(3));
        let displaced = index.put(t, RecordId::new(7));

        assert_eq!(displaced, Some(RecordId::new(3)));
        assert_eq!(index.get(t), Some(RecordId::new(7)));
        assert_eq!(index.len(), 1);
    }
}

//! Multi-index post store

use crate::config::{DuplicatePolicy, StoreConfig};
use crate::core::record::{Record, RecordId};
use crate::core::temporal::{Timestamp, YearMonth};
use crate::error::{Error, Result};
use crate::index::{PointIndex, PriorityIndex, RangeIndex};
use tracing::{debug, warn};

/// Upper bound on what `initial_capacity` reserves up front; larger hints
/// are clamped and the containers grow on demand past it.
pub const MAX_PREALLOCATED: usize = 1 << 20;

/// Owns every record and keeps the three indexes in step
///
/// Records live in an append-only arena; the indexes hold [`RecordId`]s into
/// it. The priority index is consumed by [`Store::extract_max`], the other
/// two keep every record for the life of the store.
#[derive(Debug, Default)]
pub struct Store {
    config: StoreConfig,
    records: Vec<Record>,
    by_timestamp: PointIndex,
    by_time_range: RangeIndex,
    by_views: PriorityIndex,
}

impl Store {
    /// Create an empty store with the default (chaining) duplicate policy
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StoreConfig) -> Self {
        let capacity = config.initial_capacity.min(MAX_PREALLOCATED);
        Self {
            config,
            records: Vec::with_capacity(capacity),
            by_timestamp: PointIndex::with_capacity(capacity),
            by_time_range: RangeIndex::new(),
            by_views: PriorityIndex::with_capacity(capacity),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Add a record to all three indexes
    ///
    /// Under [`DuplicatePolicy::Reject`] a reused timestamp fails before any
    /// index is touched.
    pub fn insert(&mut self, record: Record) -> Result<RecordId> {
        let timestamp = record.timestamp;
        if self.config.duplicate_policy == DuplicatePolicy::Reject
            && self.by_timestamp.contains(timestamp)
        {
            warn!(%timestamp, "rejecting record with duplicate timestamp");
            return Err(Error::DuplicateTimestamp(timestamp));
        }

        let id = RecordId::new(self.records.len());
        let views = record.views;
        self.records.push(record);

        if let Some(displaced) = self.by_timestamp.put(timestamp, id) {
            debug!(%timestamp, %displaced, %id, "point index entry replaced");
        }
        self.by_time_range.insert(timestamp, id);
        self.by_views.push(views, id);

        debug!(%id, %timestamp, views, "record inserted");
        Ok(id)
    }

    /// Insert records in order, stopping at the first failure
    pub fn insert_many<I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut inserted = 0;
        for record in records {
            self.insert(record)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id.index())
    }

    /// Record most recently inserted at exactly `timestamp`
    pub fn lookup(&self, timestamp: Timestamp) -> Option<&Record> {
        self.by_timestamp.get(timestamp).and_then(|id| self.get(id))
    }

    /// Records with `start <= timestamp <= end`, ascending; empty when `start > end`
    pub fn range_query(&self, start: Timestamp, end: Timestamp) -> Vec<&Record> {
        self.resolve(self.by_time_range.range(start, end))
    }

    /// Records from the start of `start` through the end of `end`
    ///
    /// Callers that need `start` strictly before `end` check it themselves;
    /// reversed months simply select nothing.
    pub fn range_query_by_month(&self, start: &YearMonth, end: &YearMonth) -> Vec<&Record> {
        self.resolve(self.by_time_range.range_by_month(start, end))
    }

    /// Remove the most viewed record from the priority index and return it
    ///
    /// The record stays reachable through `lookup` and the range queries.
    pub fn extract_max(&mut self) -> Option<&Record> {
        let id = self.by_views.pop_max()?;
        debug!(%id, remaining = self.by_views.len(), "extracted most viewed record");
        self.records.get(id.index())
    }

    /// Most viewed record still in the priority index, without removing it
    pub fn peek_max(&self) -> Option<&Record> {
        self.by_views.peek_max().and_then(|id| self.get(id))
    }

    /// Every record, ascending by timestamp
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.by_time_range.iter().filter_map(|id| self.get(id))
    }

    /// Every record, most viewed first; ties keep insertion order
    pub fn ranked_by_views(&self) -> Vec<&Record> {
        let mut ranked: Vec<&Record> = self.records.iter().collect();
        ranked.sort_by(|a, b| b.views.cmp(&a.views));
        ranked
    }

    /// Number of records ever inserted
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records still waiting in the priority index
    pub fn pending_by_views(&self) -> usize {
        self.by_views.len()
    }

    /// Distinct timestamps in the point index
    pub fn distinct_timestamps(&self) -> usize {
        self.by_timestamp.len()
    }

    fn resolve(&self, ids: Vec<RecordId>) -> Vec<&Record> {
        ids.into_iter().filter_map(|id| self.get(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn post(stamp: &str, body: &str, views: u64) -> Record {
        Record::new(ts(stamp), body, "User1").with_views(views)
    }

    fn bodies(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.body.clone()).collect()
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut store = Store::new();
        let id = store.insert(post("2024-01-15 10:00:00", "a", 5)).unwrap();

        assert_eq!(store.get(id).unwrap().body, "a");
        assert_eq!(store.lookup(ts("2024-01-15 10:00:00")).unwrap().body, "a");
        assert!(store.lookup(ts("2024-01-15 10:00:01")).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_extract_max_on_fresh_store() {
        let mut store = Store::new();
        assert!(store.is_empty());
        assert!(store.extract_max().is_none());
        assert!(store.peek_max().is_none());
    }

    #[test]
    fn test_extract_max_drains_only_priority_index() {
        let mut store = Store::new();
        store.insert(post("2024-01-01 00:00:00", "low", 1)).unwrap();
        store.insert(post("2024-01-02 00:00:00", "high", 100)).unwrap();
        store.insert(post("2024-01-03 00:00:00", "mid", 50)).unwrap();

        assert_eq!(store.peek_max().unwrap().body, "high");
        assert_eq!(store.pending_by_views(), 3);

        let drained: Vec<String> =
            std::iter::from_fn(|| store.extract_max().map(|r| r.body.clone())).collect();
        assert_eq!(drained, ["high", "mid", "low"]);
        assert_eq!(store.pending_by_views(), 0);
        assert!(store.extract_max().is_none());

        assert_eq!(store.lookup(ts("2024-01-02 00:00:00")).unwrap().body, "high");
        let all = store.range_query(ts("2024-01-01 00:00:00"), ts("2024-01-03 00:00:00"));
        assert_eq!(bodies(&all), ["low", "high", "mid"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_duplicate_timestamps_chain() {
        let mut store = Store::new();
        store.insert(post("2024-03-10 09:30:00", "first", 10)).unwrap();
        store.insert(post("2024-03-10 09:30:00", "second", 20)).unwrap();

        assert_eq!(store.lookup(ts("2024-03-10 09:30:00")).unwrap().body, "second");
        assert_eq!(store.distinct_timestamps(), 1);

        let hits = store.range_query(ts("2024-03-10 00:00:00"), ts("2024-03-10 23:59:59"));
        assert_eq!(bodies(&hits), ["first", "second"]);

        assert_eq!(store.extract_max().unwrap().body, "second");
        assert_eq!(store.extract_max().unwrap().body, "first");
        assert!(store.extract_max().is_none());
    }

    #[test]
    fn test_duplicate_timestamps_rejected() {
        let config = StoreConfig::default().with_duplicate_policy(DuplicatePolicy::Reject);
        let mut store = Store::with_config(config);
        store.insert(post("2024-03-10 09:30:00", "first", 10)).unwrap();

        let err = store.insert(post("2024-03-10 09:30:00", "second", 20)).unwrap_err();
        assert!(matches!(err, Error::DuplicateTimestamp(t) if t == ts("2024-03-10 09:30:00")));

        assert_eq!(store.len(), 1);
        assert_eq!(store.pending_by_views(), 1);
        assert_eq!(store.lookup(ts("2024-03-10 09:30:00")).unwrap().body, "first");
        assert_eq!(store.iter().count(), 1);
    }

    #[test]
    fn test_insert_many_stops_at_first_rejection() {
        let config = StoreConfig::default()
            .with_duplicate_policy(DuplicatePolicy::Reject)
            .with_initial_capacity(8);
        let mut store = Store::with_config(config);

        let result = store.insert_many(vec![
            post("2024-01-01 00:00:00", "a", 1),
            post("2024-01-02 00:00:00", "b", 2),
            post("2024-01-01 00:00:00", "c", 3),
            post("2024-01-03 00:00:00", "d", 4),
        ]);

        assert!(result.is_err());
        assert_eq!(store.len(), 2);
        assert_eq!(Store::new().insert_many(Vec::new()).unwrap(), 0);
    }

    #[test]
    fn test_range_query_by_month_january() {
        let mut store = Store::new();
        store.insert(post("2024-01-31 23:59:59", "last", 1)).unwrap();
        store.insert(post("2024-02-01 00:00:00", "feb", 1)).unwrap();
        store.insert(post("2024-01-01 00:00:00", "first", 1)).unwrap();
        store.insert(post("2023-12-31 23:59:59", "dec", 1)).unwrap();

        let jan = YearMonth::parse("2024-01").unwrap();
        let hits = store.range_query_by_month(&jan, &jan);
        assert_eq!(bodies(&hits), ["first", "last"]);
    }

    #[test]
    fn test_range_query_by_month_february() {
        let mut store = Store::new();
        store.insert(post("2024-02-29 12:00:00", "leap", 1)).unwrap();
        store.insert(post("2023-02-28 23:59:59", "plain-last", 1)).unwrap();
        store.insert(post("2023-03-01 00:00:00", "march", 1)).unwrap();

        let feb24 = YearMonth::parse("2024-02").unwrap();
        assert_eq!(bodies(&store.range_query_by_month(&feb24, &feb24)), ["leap"]);

        let feb23 = YearMonth::parse("2023-02").unwrap();
        assert_eq!(feb23.last_instant(), ts("2023-02-28 23:59:59"));
        assert_eq!(bodies(&store.range_query_by_month(&feb23, &feb23)), ["plain-last"]);
    }

    #[test]
    fn test_range_query_spanning_months() {
        let mut store = Store::new();
        for (stamp, body) in [
            ("2023-11-30 23:59:59", "nov"),
            ("2023-12-15 08:00:00", "dec"),
            ("2024-01-20 08:00:00", "jan"),
            ("2024-02-29 23:59:59", "feb"),
            ("2024-03-01 00:00:00", "mar"),
        ] {
            store.insert(post(stamp, body, 0)).unwrap();
        }

        let start = YearMonth::parse("2023-12").unwrap();
        let end = YearMonth::parse("2024-02").unwrap();
        assert_eq!(
            bodies(&store.range_query_by_month(&start, &end)),
            ["dec", "jan", "feb"]
        );
        assert!(store.range_query_by_month(&end, &start).is_empty());
    }

    #[test]
    fn test_oversized_capacity_hint_is_clamped() {
        let config =
            StoreConfig::from_json(r#"{"initial_capacity": 18446744073709551615}"#).unwrap();
        let mut store = Store::with_config(config);

        assert_eq!(store.config().initial_capacity, usize::MAX);
        store.insert(post("2024-01-01 00:00:00", "a", 1)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_leap_second_record_lands_in_its_month() {
        let leap = chrono::NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 1_000)
            .unwrap();
        let mut store = Store::new();
        store
            .insert(Record::new(Timestamp::from_datetime(leap), "leap", "User1"))
            .unwrap();

        let jan = YearMonth::parse("2024-01").unwrap();
        let feb = YearMonth::parse("2024-02").unwrap();
        assert_eq!(bodies(&store.range_query_by_month(&jan, &jan)), ["leap"]);
        assert!(store.range_query_by_month(&feb, &feb).is_empty());
    }

    #[test]
    fn test_iter_and_ranked_listing() {
        let mut store = Store::new();
        store.insert(post("2024-05-03 00:00:00", "c", 30)).unwrap();
        store.insert(post("2024-05-01 00:00:00", "a", 10)).unwrap();
        store.insert(post("2024-05-02 00:00:00", "b", 30)).unwrap();

        let by_time: Vec<&Record> = store.iter().collect();
        assert_eq!(bodies(&by_time), ["a", "b", "c"]);
        assert_eq!(bodies(&store.ranked_by_views()), ["c", "b", "a"]);
        assert_eq!(store.pending_by_views(), 3);
    }
}

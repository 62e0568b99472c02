//! Post records and their store handles

use crate::core::temporal::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle of a record inside a [`Store`](crate::store::Store)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(usize);

impl RecordId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the store's arena (also the insertion sequence number)
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One timestamped, authored post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// When the post was published
    pub timestamp: Timestamp,
    /// Post text
    pub body: String,
    /// Author identifier
    pub author: String,
    /// View count
    pub views: u64,
}

impl Record {
    /// Create a record with zero views
    pub fn new(timestamp: Timestamp, body: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            timestamp,
            body: body.into(),
            author: author.into(),
            views: 0,
        }
    }

    /// Set the view count
    pub fn with_views(mut self, views: u64) -> Self {
        self.views = views;
        self
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} by {} ({} views)",
            self.timestamp, self.body, self.author, self.views
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_display() {
        let ts = Timestamp::parse("2024-05-01 12:30:00").unwrap();
        let record = Record::new(ts, "Post about cooking", "User7").with_views(1234);

        assert_eq!(
            record.to_string(),
            "2024-05-01 12:30:00 - Post about cooking by User7 (1234 views)"
        );
    }

    #[test]
    fn test_record_defaults_to_zero_views() {
        let record = Record::new(Timestamp::now(), "hello", "User1");
        assert_eq!(record.views, 0);
    }

    #[test]
    fn test_record_json() {
        let ts = Timestamp::parse("2024-05-01 12:30:00").unwrap();
        let record = Record::new(ts, "Post about eid", "User2").with_views(9);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "timestamp": "2024-05-01 12:30:00",
                "body": "Post about eid",
                "author": "User2",
                "views": 9
            })
        );
    }
}

//! Post-Index: an in-memory, multi-index store for timestamped posts
//!
//! One collection of posts answers three kinds of query:
//!
//! - **Point lookup**: the post published at an exact second
//! - **Range query**: every post in an inclusive time interval, oldest first
//! - **Most viewed**: repeated removal of the post with the highest view count
//!
//! Records live once, in the [`Store`](store::Store) arena; each index holds
//! handles into it. Several posts may share a timestamp: range and view
//! queries see all of them, point lookup sees the latest.
//!
//! # Example
//!
//! ```
//! use post_index::prelude::*;
//!
//! # fn example() -> post_index::error::Result<()> {
//! let mut store = Store::new();
//! let ts = Timestamp::parse("2024-01-15 09:30:00")?;
//! store.insert(Record::new(ts, "Post about sports", "User4").with_views(120))?;
//!
//! assert_eq!(store.lookup(ts).map(|r| r.views), Some(120));
//!
//! let jan = YearMonth::parse("2024-01")?;
//! assert_eq!(store.range_query_by_month(&jan, &jan).len(), 1);
//!
//! assert_eq!(store.extract_max().map(|r| r.author.as_str()), Some("User4"));
//! assert!(store.extract_max().is_none());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod generate;
pub mod index;

/// Multi-index store
pub mod store;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::{DuplicatePolicy, StoreConfig};
    pub use crate::core::*;
    pub use crate::error::{Error, Result};
    pub use crate::store::Store;
}

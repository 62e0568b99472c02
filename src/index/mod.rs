//! Indexes over the store's records
//!
//! Each index holds [`RecordId`](crate::core::RecordId) handles into the
//! store's arena and knows nothing about the other two.

pub mod point;
pub mod priority;
pub mod range;

pub use point::*;
pub use priority::*;
pub use range::*;

//! Random post generation

use crate::core::record::Record;
use crate::core::temporal::Timestamp;
use chrono::Duration;
use rand::seq::SliceRandom;
use rand::Rng;

/// Bodies the generator picks from
pub const TOPICS: [&str; 8] = [
    "Post about the weather",
    "Post about sports",
    "Post about cooking",
    "Post about traveling",
    "Post about studying",
    "Post about eid",
    "Post about ramadan",
    "Post about holiday",
];

pub const DEFAULT_MAX_USERS: u32 = 100;
pub const MAX_VIEWS: u64 = 100_000;
/// Largest batch a single run may generate
pub const MAX_POSTS: usize = 1_000_000;

/// Produces posts dated up to a year (plus a day and an hour) before `base`
#[derive(Debug, Clone)]
pub struct PostGenerator {
    max_users: u32,
    base: Timestamp,
}

impl PostGenerator {
    pub fn new(base: Timestamp) -> Self {
        Self {
            max_users: DEFAULT_MAX_USERS,
            base,
        }
    }

    /// Authors are drawn from `User1..=User{max_users}`; zero is treated as one
    pub fn with_max_users(mut self, max_users: u32) -> Self {
        self.max_users = max_users.max(1);
        self
    }

    pub fn base(&self) -> Timestamp {
        self.base
    }

    pub fn generate_one<R: Rng + ?Sized>(&self, rng: &mut R) -> Record {
        let age = Duration::days(rng.gen_range(0..=365))
            + Duration::hours(rng.gen_range(0..=24))
            + Duration::minutes(rng.gen_range(0..=60));
        let timestamp = self.base.checked_sub(age).unwrap_or(self.base);
        let author = format!("User{}", rng.gen_range(1..=self.max_users));
        let body = TOPICS.choose(rng).copied().unwrap_or(TOPICS[0]);
        let views = rng.gen_range(0..=MAX_VIEWS);

        Record::new(timestamp, body, author).with_views(views)
    }

    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Record> {
        (0..count).map(|_| self.generate_one(rng)).collect()
    }
}

//! Temporal data types and time handling

use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use nom::bytes::complete::{tag, take_while_m_n};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::separated_pair;
use nom::IResult;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Text layout of a full timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Point in time with second precision
///
/// Leap seconds are never stored: parsing refuses second 60 and
/// [`Timestamp::from_datetime`] folds it into second 59, so every instant
/// falls inside its calendar day's `00:00:00..=23:59:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Create a timestamp from a date-time, dropping sub-second digits
    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        // chrono keeps a leap second as second 59 with nanos >= 1e9
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    /// Create a timestamp from calendar fields; `None` if they name no
    /// instant (second 60 included)
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, min, sec)
            .map(Self)
    }

    /// Create a timestamp from seconds since Unix epoch
    pub fn from_secs(secs: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| Self(dt.naive_utc()))
    }

    /// Get current timestamp
    pub fn now() -> Self {
        Self::from_datetime(Utc::now().naive_utc())
    }

    /// Parse `YYYY-MM-DD HH:MM:SS`; second 60 is refused
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let dt = NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT).map_err(|e| {
            Error::MalformedInput(format!("'{}' is not YYYY-MM-DD HH:MM:SS ({})", trimmed, e))
        })?;
        if dt.nanosecond() >= 1_000_000_000 {
            return Err(Error::MalformedInput(format!(
                "'{}' names a leap second",
                trimmed
            )));
        }
        Ok(Self(dt))
    }

    /// Get seconds since Unix epoch
    pub fn as_secs(&self) -> i64 {
        self.0.and_utc().timestamp()
    }

    /// Step back by `delta`; `None` on calendar overflow
    pub fn checked_sub(&self, delta: Duration) -> Option<Self> {
        self.0.checked_sub_signed(delta).map(Self::from_datetime)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self::from_datetime(dt)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Timestamp::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// A calendar month used as a range bound
///
/// Construction resolves the month's first and last instants, so every
/// accessor is infallible. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
    first: Timestamp,
    last: Timestamp,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let bad_month = || {
            Error::MalformedInput(format!("{:04}-{:02} is not a calendar month", year, month))
        };

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(bad_month)?;
        let last_day = last_day_of_month(first_day).ok_or_else(bad_month)?;
        let first = first_day.and_hms_opt(0, 0, 0).ok_or_else(bad_month)?;
        let last = last_day.and_hms_opt(23, 59, 59).ok_or_else(bad_month)?;

        Ok(Self {
            year,
            month,
            first: Timestamp(first),
            last: Timestamp(last),
        })
    }

    /// Parse `YYYY-MM` (a single-digit month is accepted)
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let (_, (year, month)) = year_month(trimmed)
            .map_err(|_| Error::MalformedInput(format!("'{}' is not YYYY-MM", trimmed)))?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Midnight on the first day of the month
    pub fn first_instant(&self) -> Timestamp {
        self.first
    }

    /// 23:59:59 on the last day of the month
    pub fn last_instant(&self) -> Timestamp {
        self.last
    }

    /// Last calendar day of the month
    pub fn last_day(&self) -> NaiveDate {
        self.last.0.date()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Day 28 exists in every month and four more days always lands in the next
/// one; stepping back by that date's day-of-month gives the last day.
fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    let next_month = date.with_day(28)?.checked_add_days(Days::new(4))?;
    next_month.checked_sub_days(Days::new(u64::from(next_month.day())))
}

fn year_month(input: &str) -> IResult<&str, (i32, u32)> {
    all_consuming(separated_pair(
        map_res(take_while_m_n(4, 4, |c: char| c.is_ascii_digit()), str::parse::<i32>),
        tag("-"),
        map_res(take_while_m_n(1, 2, |c: char| c.is_ascii_digit()), str::parse::<u32>),
    ))(input)
}

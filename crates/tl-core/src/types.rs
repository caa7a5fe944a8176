//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A date label was not of the form `M/D`.
    #[error("invalid date: {value} (expected M/D, e.g. 5/14)")]
    InvalidDate { value: String },

    /// Month or day outside its calendar range.
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: u32 },
}

/// A month/day label as established by the log's date markers.
///
/// The log has no notion of year per day, so two dates are only comparable
/// by label; ordering across months follows `(month, day)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogDate {
    month: u32,
    day: u32,
}

impl LogDate {
    /// Creates a date after validating month (1-12) and day (1-31).
    pub fn new(month: u32, day: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::OutOfRange {
                field: "month",
                value: month,
            });
        }
        if !(1..=31).contains(&day) {
            return Err(ValidationError::OutOfRange {
                field: "day",
                value: day,
            });
        }
        Ok(Self { month, day })
    }

    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    #[must_use]
    pub const fn day(self) -> u32 {
        self.day
    }
}

impl fmt::Display for LogDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.day)
    }
}

impl FromStr for LogDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "date" });
        }
        let invalid = || ValidationError::InvalidDate {
            value: s.to_string(),
        };
        let (month, day) = s.split_once('/').ok_or_else(invalid)?;
        let month = month.parse().map_err(|_| invalid())?;
        let day = day.parse().map_err(|_| invalid())?;
        Self::new(month, day)
    }
}

impl Serialize for LogDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LogDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Which day an event listing is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayQuery {
    /// A specific `M/D` label.
    Date(LogDate),
    /// The date of the last event in the log.
    Latest,
}

impl FromStr for DayQuery {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("latest") {
            return Ok(Self::Latest);
        }
        s.parse().map(Self::Date)
    }
}

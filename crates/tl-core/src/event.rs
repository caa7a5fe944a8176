//! Parsed activity events.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::types::LogDate;

/// One entry of the activity log.
///
/// Events are produced by the parser only. The timestamp in the log is the
/// *end* of the activity, so `duration` is the time elapsed since the
/// previous entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Month/day label of the enclosing day marker.
    pub date: LogDate,
    /// Zero-based ordinal of the enclosing day marker.
    pub day: usize,
    /// Elapsed hours since the previous entry, in `[0, 24)`.
    pub duration: f64,
    pub category: Category,
    pub description: String,
    /// 1-based line in the source log.
    pub line: usize,
}

impl Event {
    /// Whether the description mentions `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.description.contains(needle)
    }
}

//! Day-by-category duration table.
//!
//! # Algorithm
//!
//! Each day marker owns one column. Events are walked in log order:
//!
//! 1. The first event of a day is the wake-up entry. Its duration is the
//!    overnight gap, so it is not counted anywhere.
//! 2. Events in the ignored category are skipped.
//! 3. Every other event adds its duration to its category row and to `tot`,
//!    and also to `org` when the description carries the organized marker.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::category::Category;
use crate::event::Event;
use crate::parser::ParsedLog;
use crate::types::LogDate;

/// Configuration for table aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    /// Category whose events are never counted.
    /// Default: `fff`.
    pub ignored: Category,

    /// Substring marking organized work in a description. Empty disables the
    /// `org` row.
    /// Default: `orgz`.
    pub organized_marker: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            ignored: Category::IGNORED,
            organized_marker: "orgz".to_string(),
        }
    }
}

/// Row of the table: one per category plus the two aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Row {
    Category(Category),
    /// Events marked as organized work; overlaps the category rows.
    Organized,
    /// Sum of all category rows.
    Total,
}

impl Row {
    pub const COUNT: usize = Category::ALL.len() + 2;

    /// Every row, in table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Category(Category::Task1),
        Self::Category(Category::Task2),
        Self::Category(Category::Task3),
        Self::Category(Category::Break1),
        Self::Category(Category::Break2),
        Self::Category(Category::Break3),
        Self::Category(Category::Fixed1),
        Self::Category(Category::Fixed2),
        Self::Category(Category::Fixed3),
        Self::Category(Category::Misc),
        Self::Organized,
        Self::Total,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Category(category) => category.index(),
            Self::Organized => Category::ALL.len(),
            Self::Total => Category::ALL.len() + 1,
        }
    }

    /// Row label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category(category) => category.as_str(),
            Self::Organized => "org",
            Self::Total => "tot",
        }
    }
}

/// Hours per row for a single day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    date: LogDate,
    hours: [f64; Row::COUNT],
}

impl DayColumn {
    const fn new(date: LogDate) -> Self {
        Self {
            date,
            hours: [0.0; Row::COUNT],
        }
    }

    pub const fn date(&self) -> LogDate {
        self.date
    }

    pub const fn get(&self, row: Row) -> f64 {
        self.hours[row.index()]
    }

    fn add(&mut self, row: Row, hours: f64) {
        self.hours[row.index()] += hours;
    }
}

/// Hours per category and day. Columns follow day markers in log order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<DayColumn>,
}

/// Errors selecting part of a table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("no day {0} in the log")]
    UnknownDay(LogDate),

    #[error("range start {from} comes after its end {to}")]
    ReversedRange { from: LogDate, to: LogDate },
}

/// Which columns of a table to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Window {
    #[default]
    All,
    /// Every column labeled with this date.
    Day(LogDate),
    /// From the first column labeled `from` to the last labeled `to`.
    Range { from: LogDate, to: LogDate },
    /// The most recent `n` columns.
    Last(usize),
}

impl Table {
    /// Creates an all-zero table with one column per date.
    pub fn new(days: &[LogDate]) -> Self {
        Self {
            columns: days.iter().copied().map(DayColumn::new).collect(),
        }
    }

    pub fn columns(&self) -> &[DayColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column labels, in order.
    pub fn dates(&self) -> impl Iterator<Item = LogDate> + '_ {
        self.columns.iter().map(DayColumn::date)
    }

    /// One row across all days.
    pub fn row(&self, row: Row) -> impl Iterator<Item = f64> + '_ {
        self.columns.iter().map(move |c| c.get(row))
    }

    /// Index of the first column labeled `date`.
    pub fn position(&self, date: LogDate) -> Option<usize> {
        self.columns.iter().position(|c| c.date == date)
    }

    /// Copies out the columns a window selects.
    pub fn window(&self, window: Window) -> Result<Self, WindowError> {
        let columns = match window {
            Window::All => self.columns.clone(),
            Window::Day(date) => {
                let columns: Vec<_> = self
                    .columns
                    .iter()
                    .filter(|c| c.date == date)
                    .cloned()
                    .collect();
                if columns.is_empty() {
                    return Err(WindowError::UnknownDay(date));
                }
                columns
            }
            Window::Range { from, to } => {
                let start = self.position(from).ok_or(WindowError::UnknownDay(from))?;
                let end = self
                    .columns
                    .iter()
                    .rposition(|c| c.date == to)
                    .ok_or(WindowError::UnknownDay(to))?;
                if start > end {
                    return Err(WindowError::ReversedRange { from, to });
                }
                self.columns[start..=end].to_vec()
            }
            Window::Last(n) => {
                let start = self.columns.len().saturating_sub(n);
                self.columns[start..].to_vec()
            }
        };
        Ok(Self { columns })
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        struct Rows<'a>(&'a Table);

        impl Serialize for Rows<'_> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.collect_map(
                    Row::ALL
                        .iter()
                        .map(|&row| (row.as_str(), self.0.row(row).collect::<Vec<_>>())),
                )
            }
        }

        let mut state = serializer.serialize_struct("Table", 2)?;
        state.serialize_field("days", &self.dates().collect::<Vec<_>>())?;
        state.serialize_field("rows", &Rows(self))?;
        state.end()
    }
}

/// Folds events into a table with one column per entry of `days`.
///
/// `events` must come from the same parse as `days`: each event's `day`
/// ordinal indexes into `days`.
pub fn aggregate(events: &[Event], days: &[LogDate], config: &TableConfig) -> Table {
    let mut table = Table::new(days);
    let mut current_day = None;

    for event in events {
        if current_day != Some(event.day) {
            current_day = Some(event.day);
            continue;
        }
        if event.category == config.ignored {
            continue;
        }
        let Some(column) = table.columns.get_mut(event.day) else {
            tracing::warn!(line = event.line, day = event.day, "event outside of known days");
            continue;
        };
        column.add(Row::Category(event.category), event.duration);
        column.add(Row::Total, event.duration);
        if !config.organized_marker.is_empty() && event.mentions(&config.organized_marker) {
            column.add(Row::Organized, event.duration);
        }
    }

    table
}

impl ParsedLog {
    /// Aggregates this log into a table.
    pub fn table(&self, config: &TableConfig) -> Table {
        aggregate(&self.events, &self.days, config)
    }
}

//! Core domain logic for the activity log analyzer.
//!
//! This crate contains the fundamental types and logic for:
//! - Clock: decoding shorthand timestamps into elapsed hours
//! - Parsing: turning the plain-text log into dated, categorized events
//! - Tables: folding events into hours per category and day
//! - Filtering: selecting events for ad hoc listings

pub mod category;
pub mod clock;
mod event;
mod filter;
pub mod parser;
mod table;
mod types;

pub use category::{Category, Kind, UnknownCategory};
pub use clock::{DurationClock, TimestampError};
pub use event::Event;
pub use filter::{EventQuery, Selection, select};
pub use parser::{LogParser, ParseError, ParsedLog, parse, parse_reader, parse_str};
pub use table::{DayColumn, Row, Table, TableConfig, Window, WindowError, aggregate};
pub use types::{DayQuery, LogDate, ValidationError};

//! Line-oriented parser for the activity log.
//!
//! # Log format
//!
//! ```text
//! log
//! $ May 2015
//! # Fri 1
//! 700 wake_fff
//! 930 email
//! 50 plan the week orgz_t
//! /*
//! anything in here is skipped
//! */
//! % a note to self
//! ```
//!
//! - `$ <Month> <Year>` starts a month, `# <Weekday> <Day>` starts a day.
//! - `/*` opens a block comment and a line reading `*/` closes it.
//! - Blank lines, the `log` header and lines starting with `%` or `;` are skipped.
//! - Anything else is an event: `<timestamp> <description>[_<category>]`.
//!   The first `_` ends the description, so descriptions cannot contain one.
//! - A month marker keeps the current day, and a day marker may come before
//!   the first month marker. Events need both.
//!
//! See [`crate::clock`] for the timestamp shorthand.

use std::io::BufRead;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Month, Weekday};
use regex::Regex;
use thiserror::Error;

use crate::category::Category;
use crate::clock::{DurationClock, TimestampError};
use crate::event::Event;
use crate::types::LogDate;

/// `<Month> <Year>`, e.g. `May 2015`.
static MONTH_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]+)\s+(\d{4})$").unwrap());

/// `<Weekday> <Day>`, e.g. `Tues 5`.
static DAY_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]{3,})\.?\s+(\d{1,2})$").unwrap());

const HEADER: &str = "log";
const MONTH_PREFIX: char = '$';
const DAY_PREFIX: char = '#';
const ANNOTATION_PREFIXES: [char; 2] = ['%', ';'];
const COMMENT_OPEN: &str = "/*";
const COMMENT_CLOSE: &str = "*/";
const CATEGORY_DELIMITER: char = '_';

/// Errors that abort a parse.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: malformed timestamp `{token}`: {source}")]
    MalformedTimestamp {
        line: usize,
        token: String,
        #[source]
        source: TimestampError,
    },

    #[error("line {line}: malformed date marker `{text}`, expected {expected}")]
    MalformedDateMarker {
        line: usize,
        text: String,
        expected: &'static str,
    },

    #[error("line {line} ({date}): unknown category `{category}` in `{text}`")]
    UnknownCategory {
        line: usize,
        date: LogDate,
        category: String,
        text: String,
    },

    #[error("line {line}: event before any month and day marker: `{text}`")]
    EventBeforeDateContext { line: usize, text: String },

    #[error("block comment opened on line {line} is never closed")]
    UnterminatedComment { line: usize },

    #[error("failed to read line {line}")]
    Io {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Line the error points at.
    pub const fn line(&self) -> usize {
        match self {
            Self::MalformedTimestamp { line, .. }
            | Self::MalformedDateMarker { line, .. }
            | Self::UnknownCategory { line, .. }
            | Self::EventBeforeDateContext { line, .. }
            | Self::UnterminatedComment { line }
            | Self::Io { line, .. } => *line,
        }
    }
}

/// What a single trimmed line means, outside of a block comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Starts a block comment.
    CommentOpen,
    /// Ends a block comment.
    CommentClose,
    /// Carries nothing: blank, header, annotation or one-line comment.
    Skip,
    /// Remainder of a `$` line.
    Month(&'a str),
    /// Remainder of a `#` line.
    Day(&'a str),
    Event(&'a str),
}

type Rule = fn(&str) -> Option<LineKind<'_>>;

/// Classification rules, tried in order. Lines no rule claims are events.
const RULES: [Rule; 5] = [
    comment_open,
    comment_close,
    skippable,
    month_marker,
    day_marker,
];

fn comment_open(line: &str) -> Option<LineKind<'_>> {
    let rest = line.strip_prefix(COMMENT_OPEN)?;
    if rest.ends_with(COMMENT_CLOSE) {
        Some(LineKind::Skip)
    } else {
        Some(LineKind::CommentOpen)
    }
}

fn comment_close(line: &str) -> Option<LineKind<'_>> {
    (line == COMMENT_CLOSE).then_some(LineKind::CommentClose)
}

fn skippable(line: &str) -> Option<LineKind<'_>> {
    let skip = line.is_empty() || line == HEADER || line.starts_with(ANNOTATION_PREFIXES);
    skip.then_some(LineKind::Skip)
}

fn month_marker(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix(MONTH_PREFIX)
        .map(|rest| LineKind::Month(rest.trim()))
}

fn day_marker(line: &str) -> Option<LineKind<'_>> {
    line.strip_prefix(DAY_PREFIX)
        .map(|rest| LineKind::Day(rest.trim()))
}

/// Classifies one line, ignoring block-comment state.
pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim();
    RULES
        .iter()
        .find_map(|rule| rule(line))
        .unwrap_or(LineKind::Event(line))
}

/// Parses the remainder of a month marker into its month number.
fn parse_month(text: &str) -> Option<(u32, i32)> {
    let caps = MONTH_MARKER_RE.captures(text)?;
    let month = Month::from_str(&caps[1]).ok()?;
    let year: i32 = caps[2].parse().ok()?;
    Some((month.number_from_month(), year))
}

/// Parses the remainder of a day marker into its day number.
///
/// Only the first three letters of the weekday are checked, so `Tues` and
/// `Thurs` are accepted alongside `Tue` and `Thursday`.
fn parse_day(text: &str) -> Option<u32> {
    let caps = DAY_MARKER_RE.captures(text)?;
    caps[1].get(..3)?.parse::<Weekday>().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    (1..=31).contains(&day).then_some(day)
}

const DAY_MARKER_SHAPE: &str = "`# <Weekday> <Day>`";

fn bind_date(line_no: usize, text: &str, month: u32, day: u32) -> Result<LogDate, ParseError> {
    LogDate::new(month, day).map_err(|_| ParseError::MalformedDateMarker {
        line: line_no,
        text: text.to_string(),
        expected: DAY_MARKER_SHAPE,
    })
}

/// Result of parsing a whole log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLog {
    /// Events in log order.
    pub events: Vec<Event>,
    /// One entry per day marker, in log order.
    pub days: Vec<LogDate>,
}

impl ParsedLog {
    /// Date of the last event, if any.
    pub fn last_date(&self) -> Option<LogDate> {
        self.events.last().map(|e| e.date)
    }
}

/// Block-comment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    /// Inside a block comment opened on the given line.
    InComment(usize),
}

/// Incremental parser; feed it lines in order, then call [`LogParser::finish`].
#[derive(Debug)]
pub struct LogParser {
    mode: Mode,
    clock: DurationClock,
    month: Option<u32>,
    /// Current day marker's number and ordinal.
    day: Option<(u32, usize)>,
    /// Day markers seen before any month marker.
    unbound_days: Vec<u32>,
    day_count: usize,
    log: ParsedLog,
}

impl Default for LogParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LogParser {
    pub const fn new() -> Self {
        Self {
            mode: Mode::Normal,
            clock: DurationClock::new(),
            month: None,
            day: None,
            unbound_days: Vec::new(),
            day_count: 0,
            log: ParsedLog {
                events: Vec::new(),
                days: Vec::new(),
            },
        }
    }

    /// Number of day markers seen so far.
    pub const fn day_count(&self) -> usize {
        self.day_count
    }

    /// Processes the line numbered `line_no` (1-based).
    pub fn feed(&mut self, line_no: usize, line: &str) -> Result<(), ParseError> {
        let line = line.trim();

        if let Mode::InComment(_) = self.mode {
            if line == COMMENT_CLOSE {
                self.mode = Mode::Normal;
            }
            return Ok(());
        }

        match classify(line) {
            LineKind::CommentOpen => self.mode = Mode::InComment(line_no),
            LineKind::CommentClose => {
                tracing::debug!(line = line_no, "stray block comment close");
            }
            LineKind::Skip => {}
            LineKind::Month(text) => self.month_marker(line_no, text)?,
            LineKind::Day(text) => self.day_marker(line_no, text)?,
            LineKind::Event(text) => self.event(line_no, text)?,
        }
        Ok(())
    }

    /// Ends the parse, failing if a block comment is still open.
    pub fn finish(self) -> Result<ParsedLog, ParseError> {
        if let Mode::InComment(line) = self.mode {
            return Err(ParseError::UnterminatedComment { line });
        }
        tracing::debug!(
            days = self.log.days.len(),
            events = self.log.events.len(),
            "parsed log"
        );
        Ok(self.log)
    }

    fn month_marker(&mut self, line_no: usize, text: &str) -> Result<(), ParseError> {
        let (month, year) =
            parse_month(text).ok_or_else(|| ParseError::MalformedDateMarker {
                line: line_no,
                text: text.to_string(),
                expected: "`$ <Month> <Year>`",
            })?;
        tracing::debug!(line = line_no, month, year, "month marker");
        self.month = Some(month);

        for day in std::mem::take(&mut self.unbound_days) {
            let date = bind_date(line_no, text, month, day)?;
            self.log.days.push(date);
        }
        Ok(())
    }

    fn day_marker(&mut self, line_no: usize, text: &str) -> Result<(), ParseError> {
        let day = parse_day(text).ok_or_else(|| ParseError::MalformedDateMarker {
            line: line_no,
            text: text.to_string(),
            expected: DAY_MARKER_SHAPE,
        })?;
        self.day = Some((day, self.day_count));
        self.day_count += 1;

        match self.month {
            Some(month) => {
                let date = bind_date(line_no, text, month, day)?;
                tracing::debug!(line = line_no, %date, "day marker");
                self.log.days.push(date);
            }
            None => {
                tracing::debug!(line = line_no, day, "day marker before any month marker");
                self.unbound_days.push(day);
            }
        }
        Ok(())
    }

    fn event(&mut self, line_no: usize, text: &str) -> Result<(), ParseError> {
        let (Some(month), Some((day_number, day))) = (self.month, self.day) else {
            return Err(ParseError::EventBeforeDateContext {
                line: line_no,
                text: text.to_string(),
            });
        };
        let date = bind_date(line_no, text, month, day_number)?;

        let (token, rest) = text.split_once(' ').unwrap_or((text, ""));
        let (description, category) = match rest.split_once(CATEGORY_DELIMITER) {
            Some((description, code)) => {
                let code = code.trim();
                let category = code
                    .parse::<Category>()
                    .map_err(|_| ParseError::UnknownCategory {
                        line: line_no,
                        date,
                        category: code.to_string(),
                        text: text.to_string(),
                    })?;
                (description, category)
            }
            None => (rest, Category::Misc),
        };

        let duration = self
            .clock
            .decode(token)
            .map_err(|source| ParseError::MalformedTimestamp {
                line: line_no,
                token: token.to_string(),
                source,
            })?;

        let event = Event {
            date,
            day,
            duration,
            category,
            description: description.trim().to_string(),
            line: line_no,
        };
        tracing::trace!(?event, "event");
        self.log.events.push(event);
        Ok(())
    }
}

/// Parses a sequence of lines.
pub fn parse<I, S>(lines: I) -> Result<ParsedLog, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = LogParser::new();
    for (i, line) in lines.into_iter().enumerate() {
        parser.feed(i + 1, line.as_ref())?;
    }
    parser.finish()
}

/// Parses a whole log held in memory.
pub fn parse_str(text: &str) -> Result<ParsedLog, ParseError> {
    parse(text.lines())
}

/// Parses a log from a buffered reader, one line at a time.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<ParsedLog, ParseError> {
    let mut parser = LogParser::new();
    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.map_err(|source| ParseError::Io {
            line: line_no,
            source,
        })?;
        parser.feed(line_no, &line)?;
    }
    parser.finish()
}

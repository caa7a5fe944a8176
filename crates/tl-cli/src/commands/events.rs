//! Events command for listing individual log entries.
//!
//! One line per matching entry followed by a total. The first match is
//! listed but, like a day's wake-up entry, not counted in the total.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use tl_core::{Event, ParsedLog, Selection};

use crate::cli::EventsArgs;

/// JSON listing structure.
#[derive(Debug, Serialize)]
pub struct JsonListing<'a> {
    pub events: Vec<&'a Event>,
    pub total: f64,
}

/// Formats a single entry line.
fn format_event(event: &Event) -> String {
    let line = format!(
        "{:<5}  {:>5.2}  {:<3}  {}",
        event.date.to_string(),
        event.duration,
        event.category.as_str(),
        event.description
    );
    line.trim_end().to_string()
}

/// Formats the listing, consuming the selection.
pub fn format_listing(mut selection: Selection<'_>) -> String {
    let mut output = String::new();

    for event in selection.by_ref() {
        writeln!(output, "{}", format_event(event)).unwrap();
    }

    if selection.matched() == 0 {
        return "No matching events.\n".to_string();
    }

    writeln!(output, "{:<5}  {:>5.2}", "total", selection.total()).unwrap();
    output
}

/// Runs the events command.
pub fn run<W: Write>(writer: &mut W, log: &ParsedLog, args: &EventsArgs) -> Result<()> {
    let query = args.query();
    let mut selection = log.select(&query);
    tracing::debug!(?query, day = ?selection.day(), "selecting events");

    if args.json {
        let listing = JsonListing {
            events: selection.by_ref().collect(),
            total: selection.total(),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&listing)?)?;
    } else {
        write!(writer, "{}", format_listing(selection))?;
    }

    Ok(())
}

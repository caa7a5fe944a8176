//! Table command for hours per category and day.
//!
//! This module implements `tl table` with its selection windows
//! (--day, --from/--to, --last) and output formats (labeled, raw, JSON).

use std::io::Write;

use anyhow::{Context, Result};
use tl_core::{Category, Kind, ParsedLog, Row, Table};

use crate::Config;
use crate::cli::TableArgs;

/// How cells are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Aligned columns with row labels and blank lines between groups.
    Labeled,
    /// Comma-separated values, no labels, for pasting into a spreadsheet.
    Raw,
}

const LABEL_WIDTH: usize = 4;
const CELL_WIDTH: usize = 6;

// ========== Row Grouping ==========

/// Rows in display order, grouped by kind. The ignored category is left out.
fn row_groups(ignored: Category) -> Vec<Vec<Row>> {
    let by_kind = |kind: Kind| {
        Category::ALL
            .into_iter()
            .filter(|c| c.kind() == kind && *c != ignored)
            .map(Row::Category)
            .collect::<Vec<_>>()
    };

    let mut summary = vec![Row::Organized, Row::Total];
    summary.extend(by_kind(Kind::Misc));

    vec![
        by_kind(Kind::Task),
        by_kind(Kind::Break),
        by_kind(Kind::Fixed),
        summary,
    ]
}

// ========== Cell Formatting ==========

/// Formats hours with one decimal; anything that would print as `0.0` is
/// left blank.
pub fn format_hours(hours: f64) -> String {
    if hours.abs() < 0.05 {
        String::new()
    } else {
        format!("{hours:.1}")
    }
}

fn labeled_line<I>(label: &str, cells: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut line = format!("{label:<LABEL_WIDTH$}");
    for cell in cells {
        line.push_str(&format!("{cell:>CELL_WIDTH$}"));
    }
    line.trim_end().to_string()
}

fn raw_line<I>(cells: I) -> String
where
    I: IntoIterator<Item = String>,
{
    cells.into_iter().collect::<Vec<_>>().join(",")
}

// ========== Rendering ==========

/// Formats a table for display.
pub fn format_table(table: &Table, layout: Layout, ignored: Category) -> String {
    if table.is_empty() {
        return "No days in the selected window.\n".to_string();
    }

    let dates = || table.dates().map(|d| d.to_string());
    let hours = |row: Row| table.row(row).map(format_hours);

    let mut lines = Vec::new();
    match layout {
        Layout::Labeled => {
            lines.push(labeled_line("day", dates()));
            for group in row_groups(ignored) {
                lines.push(String::new());
                for row in group {
                    lines.push(labeled_line(row.as_str(), hours(row)));
                }
            }
        }
        Layout::Raw => {
            lines.push(raw_line(dates()));
            for row in row_groups(ignored).into_iter().flatten() {
                lines.push(raw_line(hours(row)));
            }
        }
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

// ========== Public Interface ==========

/// Runs the table command.
pub fn run<W: Write>(
    writer: &mut W,
    log: &ParsedLog,
    config: &Config,
    args: &TableArgs,
) -> Result<()> {
    let table_config = config.table_config();
    let window = args.window(config.recent_days);
    tracing::debug!(?window, days = log.days.len(), "building table");

    let table = log
        .table(&table_config)
        .window(window)
        .context("invalid day selection")?;

    if args.json {
        let json = serde_json::to_string_pretty(&table)?;
        writeln!(writer, "{json}")?;
    } else {
        let layout = if args.raw {
            Layout::Raw
        } else {
            Layout::Labeled
        };
        write!(writer, "{}", format_table(&table, layout, table_config.ignored))?;
    }

    Ok(())
}

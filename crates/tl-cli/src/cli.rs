//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tl_core::{Category, DayQuery, EventQuery, LogDate, Window};

/// Plain-text activity log analyzer.
///
/// Reads a hand-typed daily log and reports hours per category and day,
/// or lists individual entries.
#[derive(Debug, Parser)]
#[command(name = "tl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the activity log (overrides the configured one).
    #[arg(short, long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show hours per category for each day.
    Table(TableArgs),

    /// List individual log entries.
    Events(EventsArgs),

    /// Parse the log and report the first problem, if any.
    Check,
}

/// Arguments for `tl table`.
#[derive(Debug, Default, Args)]
pub struct TableArgs {
    /// Show a single day.
    #[arg(long, value_name = "M/D", conflicts_with_all = ["from", "last"])]
    pub day: Option<LogDate>,

    /// First day of a range.
    #[arg(long, value_name = "M/D", requires = "to", conflicts_with = "last")]
    pub from: Option<LogDate>,

    /// Last day of a range.
    #[arg(long, value_name = "M/D", requires = "from")]
    pub to: Option<LogDate>,

    /// Show the most recent N days.
    #[arg(long, value_name = "N")]
    pub last: Option<usize>,

    /// Comma-separated values without row labels.
    #[arg(long)]
    pub raw: bool,

    /// Output as JSON.
    #[arg(long, conflicts_with = "raw")]
    pub json: bool,
}

impl TableArgs {
    /// Window selected by the flags, falling back to the most recent
    /// `recent_days` when none is given.
    pub fn window(&self, recent_days: Option<usize>) -> Window {
        match (self.day, self.from, self.to, self.last) {
            (Some(date), ..) => Window::Day(date),
            (None, Some(from), Some(to), _) => Window::Range { from, to },
            (.., Some(n)) => Window::Last(n),
            _ => recent_days.map_or(Window::All, Window::Last),
        }
    }
}

/// Arguments for `tl events`.
#[derive(Debug, Default, Args)]
pub struct EventsArgs {
    /// Only this day; `latest` for the last day in the log.
    #[arg(long, value_name = "M/D|latest")]
    pub day: Option<DayQuery>,

    /// Only this category code (t, tt, ttt, b, bb, bbb, f, ff, fff, mis).
    #[arg(long, value_name = "CODE")]
    pub category: Option<Category>,

    /// Only entries whose description contains this text.
    #[arg(long, value_name = "TEXT")]
    pub include: Option<String>,

    /// Skip entries whose description contains this text.
    #[arg(long, value_name = "TEXT")]
    pub exclude: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

impl EventsArgs {
    pub fn query(&self) -> EventQuery {
        EventQuery {
            day: self.day,
            category: self.category,
            include: self.include.clone(),
            exclude: self.exclude.clone(),
        }
    }
}

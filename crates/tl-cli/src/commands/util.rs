//! Shared utilities for CLI commands.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use tl_core::{ParsedLog, parse_reader};

/// Opens and parses the activity log at `path`.
pub fn load_log(path: &Path) -> Result<ParsedLog> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let log = parse_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(
        days = log.days.len(),
        events = log.events.len(),
        "parsed activity log"
    );
    Ok(log)
}

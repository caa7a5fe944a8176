//! Check command for validating the log.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tl_core::ParsedLog;

/// Prints a one-line summary of a log that parsed cleanly.
///
/// Parse failures never reach here; they surface as the command's error.
pub fn run<W: Write>(writer: &mut W, log: &ParsedLog, path: &Path) -> Result<()> {
    let days = log.days.len();
    let events = log.events.len();

    match log.last_date() {
        Some(last) => writeln!(
            writer,
            "{}: {days} days, {events} events, last day {last}",
            path.display()
        )?,
        None => writeln!(writer, "{}: no events recorded", path.display())?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use tl_core::parse_str;

    #[test]
    fn check_summarizes_days_and_events() {
        let log = parse_str("$ May 2015\n# Fri 1\n700 wake_fff\n900 plan_t\n# Sat 2\n800 wake_fff\n")
            .unwrap();
        let mut output = Vec::new();
        run(&mut output, &log, Path::new("timelog.txt")).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!(output, @"timelog.txt: 2 days, 3 events, last day 5/2");
    }

    #[test]
    fn check_reports_empty_log() {
        let log = parse_str("% nothing yet\n").unwrap();
        let mut output = Vec::new();
        run(&mut output, &log, Path::new("timelog.txt")).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "timelog.txt: no events recorded\n");
    }
}

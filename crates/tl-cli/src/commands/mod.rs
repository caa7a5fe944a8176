//! CLI subcommand implementations.

pub mod check;
pub mod events;
pub mod table;
pub mod util;

//! Activity log analyzer CLI library.
//!
//! This crate provides the CLI interface for the activity log analyzer.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, EventsArgs, TableArgs};
pub use config::Config;

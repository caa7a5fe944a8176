use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tl_cli::commands::{check, events, table, util};
use tl_cli::{Cli, Commands, Config};

/// Load config, applying the `--log` override.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(log) = &cli.log {
        config.log_path.clone_from(log);
    }
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = load_config(&cli)?;
    let log = util::load_log(&config.log_path)?;
    let mut stdout = io::stdout().lock();

    match command {
        Commands::Table(args) => table::run(&mut stdout, &log, &config, args)?,
        Commands::Events(args) => events::run(&mut stdout, &log, args)?,
        Commands::Check => check::run(&mut stdout, &log, &config.log_path)?,
    }

    Ok(())
}

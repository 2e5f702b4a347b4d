//! Baseline CLI - Budget baseline engine
//!
//! Usage:
//!   baseline compute --file tx.csv            Typical month from the trailing window
//!   baseline snapshot --file tx.csv           Month-to-date actuals
//!   baseline classify --name X --amount -500  Explain one classification
//!   baseline config                           Show effective configuration

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Compute { file, as_of, json } => commands::cmd_compute(
            cli.config.as_deref(),
            &file,
            cli.user,
            as_of.as_deref(),
            json,
        ),
        Commands::Snapshot { file, as_of, json } => commands::cmd_snapshot(
            cli.config.as_deref(),
            &file,
            cli.user,
            as_of.as_deref(),
            json,
        ),
        Commands::Classify {
            name,
            amount,
            top,
            sub,
            merchant,
        } => commands::cmd_classify(
            cli.config.as_deref(),
            &name,
            amount,
            top.as_deref(),
            sub.as_deref(),
            merchant.as_deref(),
        ),
        Commands::Config => commands::cmd_config(cli.config.as_deref()),
    }
}

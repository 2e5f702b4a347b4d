//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Baseline - Estimate a typical month from transaction history
#[derive(Parser)]
#[command(name = "baseline")]
#[command(about = "Budget baseline engine: income, spending and paycheck cadence", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the data-dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// User id the transactions belong to
    #[arg(long, default_value = "1", global = true)]
    pub user: i64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the budget baseline over the trailing window
    Compute {
        /// Transaction export (date,amount_cents,name,...)
        #[arg(short, long)]
        file: PathBuf,

        /// Treat this date as "today" (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show month-to-date income and spending
    Snapshot {
        /// Transaction export (date,amount_cents,name,...)
        #[arg(short, long)]
        file: PathBuf,

        /// Treat this date as "today" (YYYY-MM-DD)
        #[arg(long)]
        as_of: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show how a single transaction is classified
    Classify {
        /// Transaction name as it appears on the statement
        #[arg(short, long)]
        name: String,

        /// Signed amount in cents (negative = outflow)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: i64,

        /// Top-level category
        #[arg(long)]
        top: Option<String>,

        /// Sub category
        #[arg(long)]
        sub: Option<String>,

        /// Cleaned merchant name
        #[arg(long)]
        merchant: Option<String>,
    },

    /// Show the effective configuration
    Config,
}

//! Shared utilities for commands
//!
//! This module contains:
//! - `load_config` - Resolve the engine configuration
//! - `load_store` - Read a CSV export into an in-memory store
//! - `resolve_today` - Pick "today" from `--as-of` or the reference zone
//! - `format_cents` - Render minor units as dollars

use std::path::Path;

use anyhow::{Context, Result};
use baseline_core::{import, BaselineConfig, ConfigSource, InMemoryStore};
use chrono::NaiveDate;
use tracing::debug;

/// Load config from `--config`, the data-dir override, or built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<(BaselineConfig, ConfigSource)> {
    let (config, source) =
        BaselineConfig::load_from(path).context("Failed to load baseline config")?;
    debug!("Config loaded from {}", source);
    Ok((config, source))
}

/// Read a transaction export into a store owned by `user_id`
pub fn load_store(file: &Path, user_id: i64) -> Result<InMemoryStore> {
    let transactions = import::load_csv(file)
        .with_context(|| format!("Failed to import {}", file.display()))?;
    debug!("Loaded {} transactions for user {}", transactions.len(), user_id);
    Ok(InMemoryStore::with_transactions(user_id, transactions))
}

/// `--as-of` date if given, otherwise today in the configured zone
pub fn resolve_today(as_of: Option<&str>, config: &BaselineConfig) -> Result<NaiveDate> {
    match as_of {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --as-of date format (use YYYY-MM-DD)"),
        None => Ok(config.date_windows().today()),
    }
}

/// Format cents as a dollar string, e.g. `-1234` -> `-$12.34`
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}${}.{:02}", sign, group_thousands(abs / 100), abs % 100)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            out.push(',');
        }
        out.push(c);
    }
    out
}

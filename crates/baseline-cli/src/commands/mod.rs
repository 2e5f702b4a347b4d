//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (config loading, CSV store, date and money formatting)
//! - `baseline` - Baseline and month-to-date snapshot reports
//! - `classify` - Single-transaction classification breakdown
//! - `config` - Effective configuration display

pub mod baseline;
pub mod classify;
pub mod config;
pub mod core;

// Re-export command functions for main.rs
pub use baseline::*;
pub use classify::*;
pub use config::*;
pub use core::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

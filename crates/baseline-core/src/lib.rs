//! Budget Baseline Core Library
//!
//! Turns a user's raw bank-transaction history into a budget baseline:
//! - Transfer, refund, and income classification heuristics
//! - Category name normalization
//! - Statistical primitives (winsorized mean, confidence scoring)
//! - Paycheck cadence detection
//! - Trailing-window orchestration in a reference timezone
//! - Month-to-date snapshots
//! - CSV import and an in-memory transaction store

pub mod baseline;
pub mod cadence;
pub mod category;
pub mod config;
pub mod error;
pub mod import;
pub mod income;
pub mod models;
pub mod refund;
pub mod stats;
pub mod store;
pub mod transfer;
pub mod windows;

pub use baseline::{is_baseline_expense, BaselineCalculator};
pub use cadence::{cadence_from_dates, detect_paycheck_cadence, detect_paycheck_cadence_with};
pub use category::normalize_category;
pub use config::{BaselineConfig, ConfigSource};
pub use error::{Error, Result};
pub use import::{load_csv, parse_csv};
pub use income::{looks_like_income, IncomeDetector};
pub use models::{BudgetBaseline, ConfidenceLevel, MonthSnapshot, PaycheckCadence, Transaction};
pub use refund::is_refund;
pub use stats::ConfidenceThresholds;
pub use store::{InMemoryStore, TransactionStore};
pub use transfer::{is_excluded_transfer_category, is_transfer, TransferClassifier};
pub use windows::{DateRange, DateWindows};

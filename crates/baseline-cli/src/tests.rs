//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use baseline_core::{BaselineConfig, Transaction};
use chrono::NaiveDate;
use tempfile::NamedTempFile;

use crate::commands::{self, truncate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn sample_csv() -> NamedTempFile {
    write_temp(
        "date,amount_cents,name,merchant_name,category_top,category_sub,pending\n\
         2024-01-05,250000,COZY EARTH DIR DEP,,,Payroll,false\n\
         2024-01-19,250000,COZY EARTH DIR DEP,,,Payroll,false\n\
         2024-02-02,250000,COZY EARTH DIR DEP,,,Payroll,false\n\
         2024-01-08,-10000,KING SOOPERS,,Groceries,,false\n\
         2024-02-08,-11000,KING SOOPERS,,Groceries,,false\n\
         2024-03-08,-9000,KING SOOPERS,,Groceries,,false\n\
         2024-03-09,-150000,PAYMENT THANK YOU,Chase,,Credit Card Payment,false\n",
    )
}

// ========== Formatting Tests ==========

#[test]
fn test_format_cents() {
    assert_eq!(commands::format_cents(0), "$0.00");
    assert_eq!(commands::format_cents(5), "$0.05");
    assert_eq!(commands::format_cents(-1234), "-$12.34");
    assert_eq!(commands::format_cents(123456789), "$1,234,567.89");
    assert_eq!(commands::format_cents(-100000), "-$1,000.00");
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("Groceries", 25), "Groceries");
    assert_eq!(truncate("General Merchandise And More", 10), "General...");
    assert_eq!(truncate("Café Crème Brûlée", 8), "Café ...");
}

#[test]
fn test_resolve_today() {
    let config = BaselineConfig::default();
    assert_eq!(
        commands::resolve_today(Some("2024-03-15"), &config).unwrap(),
        date(2024, 3, 15)
    );
    assert!(commands::resolve_today(Some("03/15/2024"), &config).is_err());
    assert!(commands::resolve_today(None, &config).is_ok());
}

// ========== Config Command Tests ==========

#[test]
fn test_load_config_from_file() {
    let file = write_temp("[window]\nmonths = 6\n");
    let (config, source) = commands::load_config(Some(file.path())).unwrap();
    assert_eq!(config.window_months, 6);
    assert_eq!(source.to_string(), file.path().display().to_string());
}

#[test]
fn test_load_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    assert!(commands::load_config(Some(&missing)).is_err());
    assert!(commands::cmd_config(Some(&missing)).is_err());
}

#[test]
fn test_cmd_config() {
    let file = write_temp("[income]\nnames = [\"Globex\"]\n");
    assert!(commands::cmd_config(Some(file.path())).is_ok());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_compute() {
    let csv = sample_csv();
    let config = write_temp("");
    let result = commands::cmd_compute(
        Some(config.path()),
        csv.path(),
        1,
        Some("2024-03-15"),
        false,
    );
    assert!(result.is_ok());

    let json = commands::cmd_compute(Some(config.path()), csv.path(), 1, Some("2024-03-15"), true);
    assert!(json.is_ok());
}

#[test]
fn test_cmd_compute_bad_inputs() {
    let config = write_temp("");
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");
    assert!(commands::cmd_compute(Some(config.path()), &missing, 1, None, false).is_err());

    let csv = sample_csv();
    assert!(
        commands::cmd_compute(Some(config.path()), csv.path(), 1, Some("yesterday"), false)
            .is_err()
    );

    let broken = write_temp("date,amount_cents,name\nnot-a-date,-1,x\n");
    assert!(commands::cmd_compute(Some(config.path()), broken.path(), 1, None, false).is_err());
}

#[test]
fn test_load_store_reads_csv() {
    use baseline_core::{DateRange, TransactionStore};

    let csv = sample_csv();
    let store = commands::load_store(csv.path(), 3).unwrap();
    assert_eq!(store.count(3), 7);

    let march = DateRange::month_of(date(2024, 3, 1));
    assert_eq!(store.transactions_in_range(3, march).unwrap().len(), 2);
}

#[test]
fn test_cmd_snapshot() {
    let csv = sample_csv();
    let config = write_temp("");
    assert!(
        commands::cmd_snapshot(Some(config.path()), csv.path(), 1, Some("2024-03-31"), false)
            .is_ok()
    );
    assert!(
        commands::cmd_snapshot(Some(config.path()), csv.path(), 1, Some("2024-03-31"), true)
            .is_ok()
    );
}

// ========== Classify Command Tests ==========

#[test]
fn test_classify_card_payment() {
    let config = BaselineConfig::default();
    let tx = Transaction::new(date(2024, 3, 9), -150000, "PAYMENT THANK YOU")
        .with_category(None, Some("Credit Card Payment"))
        .with_merchant("Chase");
    let c = commands::classify_transaction(&config, &tx);

    assert_eq!(c.category, "Credit Card Payment");
    assert!(!c.transfer_by_name);
    assert!(c.transfer_category_excluded);
    assert!(c.transfer_full);
    assert!(!c.baseline_expense);
    assert!(!c.baseline_income);
}

#[test]
fn test_classify_paycheck_and_grocery() {
    let config = BaselineConfig::default();

    let pay = Transaction::new(date(2024, 3, 1), 250000, "COZY EARTH DIR DEP");
    let c = commands::classify_transaction(&config, &pay);
    assert!(c.baseline_income);
    assert!(!c.other_inflow);
    assert!(!c.refund);
    assert_eq!(c.category, "Misc");

    let grocery = Transaction::new(date(2024, 3, 2), -4512, "KING SOOPERS")
        .with_category(Some("food and drink"), Some("Groceries"));
    let c = commands::classify_transaction(&config, &grocery);
    assert!(c.baseline_expense);
    assert!(!c.transfer_full);
    assert_eq!(c.category, "Food And Drink");
}

#[test]
fn test_cmd_classify() {
    let config = write_temp("");
    assert!(commands::cmd_classify(
        Some(config.path()),
        "Refund from Amazon",
        5000,
        Some("Shopping"),
        None,
        Some("Amazon"),
    )
    .is_ok());
}

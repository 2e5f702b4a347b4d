//! Single-transaction classification breakdown

use std::path::Path;

use anyhow::Result;
use baseline_core::{
    is_baseline_expense, is_excluded_transfer_category, is_refund, is_transfer, looks_like_income,
    normalize_category, BaselineConfig, Transaction,
};

use super::core::{format_cents, load_config, resolve_today};

/// Verdicts of every classifier for one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: String,
    pub transfer_by_name: bool,
    pub transfer_category_excluded: bool,
    pub transfer_full: bool,
    pub refund: bool,
    pub baseline_income: bool,
    pub other_inflow: bool,
    pub income_hint: bool,
    pub baseline_expense: bool,
}

pub fn classify_transaction(config: &BaselineConfig, tx: &Transaction) -> Classification {
    let income = config.income_detector();
    let top = tx.category_top.as_deref();
    let sub = tx.category_sub.as_deref();

    Classification {
        category: normalize_category(top, sub),
        transfer_by_name: is_transfer(Some(tx.name.as_str()), top, sub),
        transfer_category_excluded: is_excluded_transfer_category(top, sub),
        transfer_full: income.transfers().is_transfer_transaction(tx),
        refund: is_refund(Some(tx.name.as_str()), tx.amount_cents.saturating_abs()),
        baseline_income: income.is_baseline_income(tx),
        other_inflow: income.is_other_inflow(tx),
        income_hint: looks_like_income(tx),
        baseline_expense: is_baseline_expense(tx),
    }
}

pub fn cmd_classify(
    config_path: Option<&Path>,
    name: &str,
    amount_cents: i64,
    top: Option<&str>,
    sub: Option<&str>,
    merchant: Option<&str>,
) -> Result<()> {
    let (config, _) = load_config(config_path)?;
    let today = resolve_today(None, &config)?;

    let mut tx = Transaction::new(today, amount_cents, name).with_category(top, sub);
    if let Some(merchant) = merchant {
        tx = tx.with_merchant(merchant);
    }
    let c = classify_transaction(&config, &tx);

    let mark = |b: bool| if b { "✅ yes" } else { "   no" };

    println!();
    println!("🔎 Classification");
    println!("   {} ({})", tx.name, format_cents(tx.amount_cents));
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Category:                 {}", c.category);
    println!("   Transfer (name/category): {}", mark(c.transfer_by_name));
    println!("   Transfer category:        {}", mark(c.transfer_category_excluded));
    println!("   Transfer (full check):    {}", mark(c.transfer_full));
    println!("   Refund:                   {}", mark(c.refund));
    println!("   Baseline income:          {}", mark(c.baseline_income));
    println!("   Other inflow:             {}", mark(c.other_inflow));
    println!("   Looks like pay:           {}", mark(c.income_hint));
    println!("   Counts as spending:       {}", mark(c.baseline_expense));

    Ok(())
}

//! Income detection
//!
//! Separates whitelisted, recurring income from other inflows so one-off
//! deposits do not inflate the baseline.

use std::collections::HashSet;

use crate::models::Transaction;
use crate::refund::is_refund;
use crate::transfer::TransferClassifier;

/// Category substrings that suggest an inflow is pay
const INCOME_CATEGORY_HINTS: &[&str] = &["income", "payroll"];

/// Name substrings that suggest an inflow is pay
const INCOME_NAME_HINTS: &[&str] = &["payroll", "deposit"];

/// Loose income check used for month-to-date reporting
///
/// Matches "income" or "payroll" in either category, or "payroll" or
/// "deposit" in the name. Says nothing about refunds or transfers.
pub fn looks_like_income(tx: &Transaction) -> bool {
    let contains_any = |value: Option<&str>, hints: &[&str]| {
        value
            .map(|v| {
                let lower = v.to_lowercase();
                hints.iter().any(|h| lower.contains(h))
            })
            .unwrap_or(false)
    };

    contains_any(tx.category_top.as_deref(), INCOME_CATEGORY_HINTS)
        || contains_any(tx.category_sub.as_deref(), INCOME_CATEGORY_HINTS)
        || contains_any(Some(tx.name.as_str()), INCOME_NAME_HINTS)
}

/// Classifies inflows against configured payer and category whitelists
#[derive(Debug, Clone, Default)]
pub struct IncomeDetector {
    /// Lowercased payer-name substrings
    income_names: Vec<String>,
    /// Sub-category labels matched verbatim
    income_categories: HashSet<String>,
    transfers: TransferClassifier,
}

impl IncomeDetector {
    pub fn new<N, C>(income_names: N, income_categories: C, transfers: TransferClassifier) -> Self
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            income_names: income_names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
            income_categories: income_categories.into_iter().map(Into::into).collect(),
            transfers,
        }
    }

    pub fn transfers(&self) -> &TransferClassifier {
        &self.transfers
    }

    /// Positive, and neither a refund nor a transfer
    fn is_genuine_inflow(&self, tx: &Transaction) -> bool {
        tx.amount_cents > 0
            && !is_refund(Some(tx.name.as_str()), tx.amount_cents)
            && !self.transfers.is_transfer_transaction(tx)
    }

    fn matches_whitelist(&self, tx: &Transaction) -> bool {
        let name = tx.name.trim().to_lowercase();
        if self.income_names.iter().any(|n| name.contains(n.as_str())) {
            return true;
        }
        tx.category_sub
            .as_deref()
            .map(|sub| self.income_categories.contains(sub))
            .unwrap_or(false)
    }

    /// Whitelisted income that feeds the monthly income estimate
    pub fn is_baseline_income(&self, tx: &Transaction) -> bool {
        self.is_genuine_inflow(tx) && self.matches_whitelist(tx)
    }

    /// A real inflow that is not recognized as recurring income
    pub fn is_other_inflow(&self, tx: &Transaction) -> bool {
        self.is_genuine_inflow(tx) && !self.matches_whitelist(tx)
    }
}

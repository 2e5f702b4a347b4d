//! Baseline orchestration
//!
//! Pulls the trailing window from a [`TransactionStore`], splits it into
//! income and spending with the classifiers, and reduces per-month sums to
//! a typical month with a winsorized mean.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::cadence::detect_paycheck_cadence_with;
use crate::category::normalize_category;
use crate::config::BaselineConfig;
use crate::error::Result;
use crate::income::{looks_like_income, IncomeDetector};
use crate::models::{BudgetBaseline, MonthSnapshot, Transaction};
use crate::refund::is_refund;
use crate::stats::{confidence_level_with, winsorized_mean};
use crate::store::TransactionStore;
use crate::transfer::{is_excluded_transfer_category, is_transfer};
use crate::windows::{month_key, DateRange, DateWindows};

/// Computes baselines and month-to-date snapshots for users
pub struct BaselineCalculator<'a> {
    store: &'a dyn TransactionStore,
    config: BaselineConfig,
    income: IncomeDetector,
    windows: DateWindows,
}

impl<'a> BaselineCalculator<'a> {
    pub fn new(store: &'a dyn TransactionStore) -> Self {
        Self::with_config(store, BaselineConfig::default())
    }

    pub fn with_config(store: &'a dyn TransactionStore, config: BaselineConfig) -> Self {
        Self {
            store,
            income: config.income_detector(),
            windows: config.date_windows(),
            config,
        }
    }

    /// Trailing window ending in the current month of the reference zone
    pub fn window_for(&self, today: NaiveDate) -> DateRange {
        DateRange::trailing_months(today, self.config.window_months)
    }

    /// Baseline over the trailing window as of today
    pub fn calculate_baseline(&self, user_id: i64) -> Result<BudgetBaseline> {
        self.calculate_baseline_as_of(user_id, self.windows.today())
    }

    /// Baseline over the trailing window ending in `today`'s month
    pub fn calculate_baseline_as_of(&self, user_id: i64, today: NaiveDate) -> Result<BudgetBaseline> {
        let range = self.window_for(today);
        debug!("Fetching transactions for user {} in {}", user_id, range);

        let transactions = self.store.transactions_in_range(user_id, range)?;
        let baseline = self.baseline_from_transactions(&transactions);

        info!(
            "Baseline for user {}: income {}, expenses {} across {} categories, cadence {}",
            user_id,
            baseline.monthly_income_cents,
            baseline.total_monthly_expenses_cents,
            baseline.monthly_expenses_by_category.len(),
            baseline.paycheck_cadence
        );
        Ok(baseline)
    }

    /// Reduce an already-fetched window to a baseline
    pub fn baseline_from_transactions(&self, transactions: &[Transaction]) -> BudgetBaseline {
        let income: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| !tx.pending && self.income.is_baseline_income(tx))
            .collect();
        let expenses: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| is_baseline_expense(tx))
            .collect();

        debug!(
            "Partitioned {} transactions: {} income, {} expense",
            transactions.len(),
            income.len(),
            expenses.len()
        );

        let lower = self.config.lower_percentile;
        let upper = self.config.upper_percentile;

        let monthly_income = sum_by_month(income.iter().map(|tx| (tx.date, tx.amount_cents)));
        let monthly_income_cents = round_cents(winsorized_mean(&monthly_income, lower, upper));

        let mut by_category: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
        for tx in expenses.iter().copied() {
            let category = normalize_category(tx.category_top.as_deref(), tx.category_sub.as_deref());
            by_category.entry(category).or_default().push(tx);
        }

        let mut monthly_expenses_by_category = BTreeMap::new();
        let mut category_confidence_scores = BTreeMap::new();
        for (category, txs) in by_category {
            let monthly = sum_by_month(
                txs.iter()
                    .map(|tx| (tx.date, tx.amount_cents.saturating_abs())),
            );
            let typical = round_cents(winsorized_mean(&monthly, lower, upper));
            let confidence = confidence_level_with(&monthly, &self.config.confidence);

            debug!(
                "{}: {} months, typical {}, confidence {}",
                category,
                monthly.len(),
                typical,
                confidence
            );
            monthly_expenses_by_category.insert(category.clone(), typical);
            category_confidence_scores.insert(category, confidence);
        }

        let total_monthly_expenses_cents = monthly_expenses_by_category
            .values()
            .fold(0i64, |acc, v| acc.saturating_add(*v));
        let paycheck_cadence =
            detect_paycheck_cadence_with(&income, self.config.cadence_tolerance_percent);

        BudgetBaseline {
            monthly_income_cents,
            monthly_expenses_by_category,
            total_monthly_expenses_cents,
            paycheck_cadence,
            category_confidence_scores,
        }
    }

    /// Current-month actuals as of today
    pub fn month_snapshot(&self, user_id: i64) -> Result<MonthSnapshot> {
        self.month_snapshot_as_of(user_id, self.windows.today())
    }

    /// Actuals from the first of `today`'s month through `today`
    pub fn month_snapshot_as_of(&self, user_id: i64, today: NaiveDate) -> Result<MonthSnapshot> {
        let range = DateRange::month_to_date(today);
        debug!("Fetching month-to-date transactions for user {} in {}", user_id, range);

        let transactions = self.store.transactions_in_range(user_id, range)?;
        Ok(self.snapshot_from_transactions(month_key(today), &transactions))
    }

    /// Reduce an already-fetched month to a snapshot
    pub fn snapshot_from_transactions(&self, month: String, transactions: &[Transaction]) -> MonthSnapshot {
        let mut income_cents = 0i64;
        let mut expenses_by_category: BTreeMap<String, i64> = BTreeMap::new();

        for tx in transactions {
            if tx.pending
                || self.income.transfers().is_transfer_transaction(tx)
                || is_refund(Some(tx.name.as_str()), tx.amount_cents)
            {
                continue;
            }

            if tx.amount_cents > 0 {
                if self.income.is_baseline_income(tx) || looks_like_income(tx) {
                    income_cents = income_cents.saturating_add(tx.amount_cents);
                }
                continue;
            }
            if tx.amount_cents == 0 {
                continue;
            }

            let category = normalize_category(tx.category_top.as_deref(), tx.category_sub.as_deref());
            let total = expenses_by_category.entry(category).or_insert(0);
            *total = total.saturating_add(tx.amount_cents.saturating_abs());
        }

        let total_expenses_cents = expenses_by_category
            .values()
            .fold(0i64, |acc, v| acc.saturating_add(*v));
        let net_cash_flow_cents = income_cents.saturating_sub(total_expenses_cents);

        MonthSnapshot {
            month,
            income_cents,
            expenses_by_category,
            total_expenses_cents,
            net_cash_flow_cents,
            savings_cents: net_cash_flow_cents.max(0),
        }
    }
}

/// Non-pending outflow that is neither a transfer nor a refund
///
/// The refund check sees the absolute amount so outflow descriptions such as
/// "return" or "credit" are still recognized.
pub fn is_baseline_expense(tx: &Transaction) -> bool {
    let top = tx.category_top.as_deref();
    let sub = tx.category_sub.as_deref();

    !tx.pending
        && tx.amount_cents < 0
        && !is_transfer(Some(tx.name.as_str()), top, sub)
        && !is_refund(Some(tx.name.as_str()), tx.amount_cents.saturating_abs())
        && !is_excluded_transfer_category(top, sub)
}

/// Sum amounts per calendar month, in month order
fn sum_by_month(entries: impl Iterator<Item = (NaiveDate, i64)>) -> Vec<f64> {
    let mut months: BTreeMap<String, i64> = BTreeMap::new();
    for (date, cents) in entries {
        let total = months.entry(month_key(date)).or_insert(0);
        *total = total.saturating_add(cents);
    }
    months.values().map(|v| *v as f64).collect()
}

fn round_cents(value: f64) -> i64 {
    value.round() as i64
}

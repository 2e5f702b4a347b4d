//! Domain models for the baseline engine

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A bank transaction as supplied by the transaction store
///
/// Amounts are signed minor units: negative is an outflow, positive an inflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub amount_cents: i64,
    /// Raw description as received from the bank
    pub name: String,
    /// Cleaned merchant name, when the upstream source provides one
    pub merchant_name: Option<String>,
    pub category_top: Option<String>,
    pub category_sub: Option<String>,
    /// Pending transactions never feed a baseline
    #[serde(default)]
    pub pending: bool,
}

impl Transaction {
    pub fn new(date: NaiveDate, amount_cents: i64, name: impl Into<String>) -> Self {
        Self {
            date,
            amount_cents,
            name: name.into(),
            merchant_name: None,
            category_top: None,
            category_sub: None,
            pending: false,
        }
    }

    pub fn with_category(mut self, top: Option<&str>, sub: Option<&str>) -> Self {
        self.category_top = top.map(str::to_string);
        self.category_sub = sub.map(str::to_string);
        self
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant_name = Some(merchant.into());
        self
    }

    pub fn pending(mut self) -> Self {
        self.pending = true;
        self
    }

    pub fn is_inflow(&self) -> bool {
        self.amount_cents > 0
    }

    pub fn is_outflow(&self) -> bool {
        self.amount_cents < 0
    }
}

/// Inferred interval between paychecks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaycheckCadence {
    Weekly,
    Biweekly,
    SemiMonthly,
    Monthly,
    Irregular,
}

impl PaycheckCadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::SemiMonthly => "semi_monthly",
            Self::Monthly => "monthly",
            Self::Irregular => "irregular",
        }
    }
}

impl std::fmt::Display for PaycheckCadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PaycheckCadence {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "biweekly" | "bi_weekly" => Ok(Self::Biweekly),
            "semi_monthly" | "semimonthly" => Ok(Self::SemiMonthly),
            "monthly" => Ok(Self::Monthly),
            "irregular" => Ok(Self::Irregular),
            _ => Err(format!("Unknown paycheck cadence: {}", s)),
        }
    }
}

/// How stable a category's month-to-month amounts are
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConfidenceLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(format!("Unknown confidence level: {}", s)),
        }
    }
}

/// Typical-month income and spend derived from the trailing window
///
/// `monthly_expenses_by_category` and `category_confidence_scores` always
/// share the same key set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBaseline {
    pub monthly_income_cents: i64,
    pub monthly_expenses_by_category: BTreeMap<String, i64>,
    pub total_monthly_expenses_cents: i64,
    pub paycheck_cadence: PaycheckCadence,
    pub category_confidence_scores: BTreeMap<String, ConfidenceLevel>,
}

impl BudgetBaseline {
    /// Baseline for a window with no usable transactions
    pub fn empty() -> Self {
        Self {
            monthly_income_cents: 0,
            monthly_expenses_by_category: BTreeMap::new(),
            total_monthly_expenses_cents: 0,
            paycheck_cadence: PaycheckCadence::Irregular,
            category_confidence_scores: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.monthly_income_cents == 0 && self.monthly_expenses_by_category.is_empty()
    }

    /// Income left over after typical expenses (may be negative)
    pub fn monthly_surplus_cents(&self) -> i64 {
        self.monthly_income_cents - self.total_monthly_expenses_cents
    }
}

impl Default for BudgetBaseline {
    fn default() -> Self {
        Self::empty()
    }
}

/// Current-month actuals, shown next to the baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSnapshot {
    /// Calendar month as `YYYY-MM`
    pub month: String,
    pub income_cents: i64,
    pub expenses_by_category: BTreeMap<String, i64>,
    pub total_expenses_cents: i64,
    pub net_cash_flow_cents: i64,
    /// Positive part of the net cash flow
    pub savings_cents: i64,
}

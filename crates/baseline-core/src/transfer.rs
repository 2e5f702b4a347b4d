//! Transfer detection
//!
//! Money moved between a user's own accounts (including card payoffs) is
//! neither income nor spending. Two forms are provided:
//!
//! - [`is_transfer`]: name/category heuristics over keyword and pattern tables
//! - [`TransferClassifier::is_transfer_transaction`]: the full check, which
//!   adds sub-category markers, card payment phrasing and issuer merchants

use std::sync::OnceLock;

use regex::Regex;

use crate::models::Transaction;

/// Name substrings that mark a transfer
pub const TRANSFER_KEYWORDS: &[&str] = &[
    "transfer",
    "xfer",
    "online transfer",
    "external transfer",
    "internal transfer",
    "account transfer",
    "mobile transfer",
    "wire transfer",
    "ach transfer",
    "withdrawal",
    "payment to",
    "payment from",
];

/// Top or sub categories (lowercased, exact) that mark a transfer
pub const TRANSFER_CATEGORIES: &[&str] = &["transfer", "bank fees"];

/// Sub categories that callers exclude from spending outright
pub const EXCLUDED_SUB_CATEGORIES: &[&str] =
    &["Credit Card Payment", "Transfer", "Transfer Out", "Transfer In"];

/// Lowercased sub-category substrings used by the full check
pub const TRANSFER_SUB_CATEGORY_MARKERS: &[&str] = &[
    "credit card payment",
    "transfer in",
    "transfer out",
    "account transfer",
    "withdrawal",
    "loan payments",
];

const ACCOUNT_NUMBER_PATTERN: &str = r"^.*(?:account|acct)\s*(?:#|\*)?\d{2,}.*$";
const CONFIRMATION_PATTERN: &str = r"^.*(?:ref|confirmation|conf)\s*#?\s*[a-z0-9]{6,}.*$";
const PAYMENT_PATTERN: &str = r"(?i)^.*(?:payment (?:received|thank you|to|posted)|cardmember services|autopay|statement|bill pay|online payment).*$";

fn account_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ACCOUNT_NUMBER_PATTERN).expect("account number regex"))
}

fn confirmation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CONFIRMATION_PATTERN).expect("confirmation regex"))
}

fn payment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PAYMENT_PATTERN).expect("payment regex"))
}

/// Name/category transfer heuristics
///
/// A transaction without a name is never classified here.
pub fn is_transfer(name: Option<&str>, category_top: Option<&str>, category_sub: Option<&str>) -> bool {
    let Some(name) = name else {
        return false;
    };
    let name = name.trim().to_lowercase();

    if TRANSFER_KEYWORDS.iter().any(|k| name.contains(k)) {
        return true;
    }

    let category_matches = |c: Option<&str>| {
        c.map(|c| TRANSFER_CATEGORIES.contains(&c.trim().to_lowercase().as_str()))
            .unwrap_or(false)
    };
    if category_matches(category_top) || category_matches(category_sub) {
        return true;
    }

    account_number_re().is_match(&name) || confirmation_re().is_match(&name)
}

/// Category-level exclusion applied on top of [`is_transfer`] for spending
///
/// True when the top category starts with "transfer" (any case) or the sub
/// category is exactly one of [`EXCLUDED_SUB_CATEGORIES`].
pub fn is_excluded_transfer_category(category_top: Option<&str>, category_sub: Option<&str>) -> bool {
    let top_is_transfer = category_top
        .map(|t| t.trim().to_lowercase().starts_with("transfer"))
        .unwrap_or(false);
    let sub_is_excluded = category_sub
        .map(|s| EXCLUDED_SUB_CATEGORIES.contains(&s))
        .unwrap_or(false);
    top_is_transfer || sub_is_excluded
}

/// Transaction-level transfer detection with configured card issuers
#[derive(Debug, Clone, Default)]
pub struct TransferClassifier {
    /// Lowercased issuer names matched against the merchant
    issuers: Vec<String>,
}

impl TransferClassifier {
    pub fn new<I, S>(issuers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            issuers: issuers
                .into_iter()
                .map(|i| i.as_ref().trim().to_lowercase())
                .filter(|i| !i.is_empty())
                .collect(),
        }
    }

    pub fn issuers(&self) -> &[String] {
        &self.issuers
    }

    /// Full transfer check for a single transaction
    pub fn is_transfer_transaction(&self, tx: &Transaction) -> bool {
        let top = tx.category_top.as_deref();
        let sub = tx.category_sub.as_deref();

        if let Some(sub) = sub {
            let lower = sub.to_lowercase();
            if TRANSFER_SUB_CATEGORY_MARKERS.iter().any(|m| lower.contains(m))
                || (lower.contains("savings") && lower.contains("transfer"))
            {
                return true;
            }
        }

        if is_excluded_transfer_category(top, sub) {
            return true;
        }

        if payment_re().is_match(&tx.name) {
            return true;
        }

        if self.is_issuer_merchant(tx.merchant_name.as_deref()) {
            return true;
        }

        is_transfer(Some(tx.name.as_str()), top, sub)
    }

    /// Whether the merchant is one of the configured card issuers
    pub fn is_issuer_merchant(&self, merchant_name: Option<&str>) -> bool {
        let Some(merchant) = merchant_name else {
            return false;
        };
        let merchant = merchant.trim().to_lowercase();
        !merchant.is_empty() && self.issuers.iter().any(|i| merchant.contains(i.as_str()))
    }
}

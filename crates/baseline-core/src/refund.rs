//! Refund detection
//!
//! A refund reverses an earlier expense. It arrives as a positive amount but
//! must not be counted as income.

use std::sync::OnceLock;

use regex::Regex;

/// Name substrings that mark a refund or credit adjustment
pub const REFUND_KEYWORDS: &[&str] = &[
    "refund",
    "return",
    "reversal",
    "credit",
    "adjustment",
    "chargeback",
    "dispute",
    "cashback",
    "cash back",
    "rebate",
    "reimbursement",
];

const REFUND_PATTERN: &str = r"(?i)^.*(?:return|refund|credit|reversal|chargeback).*$";
const MERCHANT_RETURN_PATTERN: &str = r"(?i)^.*(?:return|refund)\s+(?:from|to)\s+.*$";

fn refund_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(REFUND_PATTERN).expect("refund regex"))
}

fn merchant_return_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MERCHANT_RETURN_PATTERN).expect("merchant return regex"))
}

/// Whether a transaction is a refund
///
/// Only positive amounts qualify. Callers checking an outflow's description
/// must pass the absolute amount.
pub fn is_refund(name: Option<&str>, amount_cents: i64) -> bool {
    if amount_cents <= 0 {
        return false;
    }
    let Some(name) = name else {
        return false;
    };
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return false;
    }

    REFUND_KEYWORDS.iter().any(|k| name.contains(k))
        || refund_re().is_match(&name)
        || merchant_return_re().is_match(&name)
}

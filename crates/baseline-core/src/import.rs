//! CSV import of transaction exports
//!
//! Expected header (column order is free, extra columns are ignored):
//!
//! ```text
//! date,amount_cents,name,merchant_name,category_top,category_sub,pending
//! ```
//!
//! `amount` in decimal dollars is accepted in place of `amount_cents`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Column positions resolved from the header row
struct Columns {
    date: usize,
    amount: AmountColumn,
    name: usize,
    merchant_name: Option<usize>,
    category_top: Option<usize>,
    category_sub: Option<usize>,
    pending: Option<usize>,
}

enum AmountColumn {
    Cents(usize),
    Dollars(usize),
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| Error::InvalidData(format!("Missing column: {}", name)))
        };

        let amount = match (find("amount_cents"), find("amount")) {
            (Some(i), _) => AmountColumn::Cents(i),
            (None, Some(i)) => AmountColumn::Dollars(i),
            (None, None) => {
                return Err(Error::InvalidData(
                    "Missing column: amount_cents (or amount)".into(),
                ))
            }
        };

        Ok(Self {
            date: require("date")?,
            amount,
            name: require("name")?,
            merchant_name: find("merchant_name"),
            category_top: find("category_top"),
            category_sub: find("category_sub"),
            pending: find("pending"),
        })
    }
}

/// Load transactions from a CSV file on disk
pub fn load_csv(path: &Path) -> Result<Vec<Transaction>> {
    debug!("Loading transactions from {}", path.display());
    let file = File::open(path)?;
    parse_csv(file)
}

/// Parse transactions from CSV data
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut transactions = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(str::is_empty) {
            warn!("Skipping blank row at line {}", line);
            continue;
        }

        transactions.push(parse_record(&record, &columns, line)?);
    }

    debug!("Parsed {} transactions", transactions.len());
    Ok(transactions)
}

fn parse_record(record: &StringRecord, columns: &Columns, line: u64) -> Result<Transaction> {
    let field = |i: usize| record.get(i).unwrap_or("");
    let optional = |i: Option<usize>| {
        i.map(field)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let date_str = field(columns.date);
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
        Error::InvalidData(format!("Line {}: invalid date '{}': {}", line, date_str, e))
    })?;

    let amount_cents = match columns.amount {
        AmountColumn::Cents(i) => field(i).parse::<i64>().map_err(|e| {
            Error::InvalidData(format!("Line {}: invalid amount '{}': {}", line, field(i), e))
        })?,
        AmountColumn::Dollars(i) => parse_dollars(field(i)).ok_or_else(|| {
            Error::InvalidData(format!("Line {}: invalid amount '{}'", line, field(i)))
        })?,
    };

    let pending = match optional(columns.pending) {
        Some(v) => parse_bool(&v).ok_or_else(|| {
            Error::InvalidData(format!("Line {}: invalid pending flag '{}'", line, v))
        })?,
        None => false,
    };

    Ok(Transaction {
        date,
        amount_cents,
        name: field(columns.name).to_string(),
        merchant_name: optional(columns.merchant_name),
        category_top: optional(columns.category_top),
        category_sub: optional(columns.category_sub),
        pending,
    })
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

/// Parse a dollar string like "-1,234.5" or "$12.34" into cents without floats
fn parse_dollars(s: &str) -> Option<i64> {
    let cleaned: String = s.chars().filter(|c| *c != ',' && *c != '$').collect();
    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };

    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if frac.len() > 2 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac_cents: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };

    let cents = whole.checked_mul(100)?.checked_add(frac_cents)?;
    Some(if negative { -cents } else { cents })
}

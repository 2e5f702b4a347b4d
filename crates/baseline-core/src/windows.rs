//! Calendar windows in a reference timezone
//!
//! "Today" depends on where the user lives, so window construction converts
//! the current instant into a local date before building month boundaries.
//! Every range is inclusive on both ends.

use std::fmt;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Zone used when none is configured
pub const DEFAULT_TIMEZONE: &str = "America/Denver";

/// An inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the bounds if given in reverse
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Number of calendar days covered
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// First day of every calendar month the range touches
    pub fn months(&self) -> Vec<NaiveDate> {
        let mut months = Vec::new();
        let mut cursor = first_of_month(self.start);
        while cursor <= self.end {
            months.push(cursor);
            match cursor.checked_add_months(Months::new(1)) {
                Some(next) => cursor = next,
                None => break,
            }
        }
        months
    }

    /// The full calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        Self::new(first_of_month(date), last_of_month(date))
    }

    /// An explicit calendar month, `None` for an invalid year/month
    pub fn month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::month_of)
    }

    /// First of the current month through `today`
    pub fn month_to_date(today: NaiveDate) -> Self {
        Self::new(first_of_month(today), today)
    }

    /// `today - days` through `today`
    pub fn trailing_days(today: NaiveDate, days: u64) -> Self {
        let start = today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        Self::new(start, today)
    }

    /// The last `months` calendar months, counting the current partial one
    ///
    /// Runs from the first day `months - 1` months back through the last day
    /// of the current month. Zero is treated as one.
    pub fn trailing_months(today: NaiveDate, months: u32) -> Self {
        let back = months.max(1) - 1;
        let start = first_of_month(today)
            .checked_sub_months(Months::new(back))
            .unwrap_or(NaiveDate::MIN);
        Self::new(start, last_of_month(today))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// First day of the month containing `date`
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.day0() as u64)
}

/// Last day of the month containing `date`
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// `YYYY-MM` key for grouping by calendar month
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Builds date windows relative to "now" in a reference timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindows {
    tz: Tz,
}

impl DateWindows {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Build from an IANA zone name such as "America/Denver"
    pub fn from_name(name: &str) -> Result<Self> {
        let tz: Tz = name
            .trim()
            .parse()
            .map_err(|_| Error::Timezone(name.to_string()))?;
        Ok(Self::new(tz))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Local calendar date of `now` in the reference zone
    pub fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.today_at(Utc::now())
    }

    pub fn current_month_at(&self, now: DateTime<Utc>) -> DateRange {
        DateRange::month_of(self.today_at(now))
    }

    pub fn current_month(&self) -> DateRange {
        self.current_month_at(Utc::now())
    }

    pub fn month(&self, year: i32, month: u32) -> Option<DateRange> {
        DateRange::month(year, month)
    }

    pub fn last_90_days_at(&self, now: DateTime<Utc>) -> DateRange {
        DateRange::trailing_days(self.today_at(now), 90)
    }

    pub fn last_90_days(&self) -> DateRange {
        self.last_90_days_at(Utc::now())
    }

    pub fn last_n_months_at(&self, now: DateTime<Utc>, months: u32) -> DateRange {
        DateRange::trailing_months(self.today_at(now), months)
    }

    pub fn last_n_months(&self, months: u32) -> DateRange {
        self.last_n_months_at(Utc::now(), months)
    }

    pub fn is_current_month_at(&self, date: NaiveDate, now: DateTime<Utc>) -> bool {
        self.current_month_at(now).contains(date)
    }

    pub fn is_current_month(&self, date: NaiveDate) -> bool {
        self.is_current_month_at(date, Utc::now())
    }
}

impl Default for DateWindows {
    fn default() -> Self {
        Self::new(chrono_tz::America::Denver)
    }
}

//! Paycheck cadence detection
//!
//! Looks at the average day gap between consecutive income deposits and
//! matches it against the usual pay schedules.

use chrono::NaiveDate;

use crate::models::{PaycheckCadence, Transaction};
use crate::stats::{is_within_tolerance, mean};

/// Default allowed deviation from each target gap
pub const DEFAULT_CADENCE_TOLERANCE_PERCENT: f64 = 20.0;

/// Minimum deposits needed before a cadence is inferred
pub const MIN_PAYCHECKS: usize = 3;

/// Target gaps in precedence order. Biweekly is checked before semi-monthly,
/// so averages in their overlapping bands resolve to biweekly.
const CADENCE_TARGETS: &[(f64, PaycheckCadence)] = &[
    (7.0, PaycheckCadence::Weekly),
    (14.0, PaycheckCadence::Biweekly),
    (15.0, PaycheckCadence::SemiMonthly),
    (30.0, PaycheckCadence::Monthly),
];

/// Infer pay frequency from baseline income transactions
pub fn detect_paycheck_cadence(income: &[&Transaction]) -> PaycheckCadence {
    detect_paycheck_cadence_with(income, DEFAULT_CADENCE_TOLERANCE_PERCENT)
}

/// Infer pay frequency with a custom tolerance
pub fn detect_paycheck_cadence_with(income: &[&Transaction], tolerance_percent: f64) -> PaycheckCadence {
    let dates: Vec<NaiveDate> = income.iter().map(|tx| tx.date).collect();
    cadence_from_dates(&dates, tolerance_percent)
}

/// Classify a set of deposit dates (any order)
pub fn cadence_from_dates(dates: &[NaiveDate], tolerance_percent: f64) -> PaycheckCadence {
    if dates.len() < MIN_PAYCHECKS {
        return PaycheckCadence::Irregular;
    }

    let mut sorted = dates.to_vec();
    sorted.sort();

    let gaps: Vec<f64> = sorted
        .windows(2)
        .map(|w| (w[1] - w[0]).num_days() as f64)
        .collect();
    let average_gap = mean(&gaps);

    CADENCE_TARGETS
        .iter()
        .find(|(target, _)| is_within_tolerance(average_gap, *target, tolerance_percent))
        .map(|(_, cadence)| *cadence)
        .unwrap_or(PaycheckCadence::Irregular)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn every(start: NaiveDate, days: i64, count: usize) -> Vec<NaiveDate> {
        (0..count as i64)
            .map(|i| start + Duration::days(i * days))
            .collect()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    #[test]
    fn test_too_few_paychecks_is_irregular() {
        assert_eq!(cadence_from_dates(&[], 20.0), PaycheckCadence::Irregular);
        assert_eq!(
            cadence_from_dates(&every(start(), 14, 2), 20.0),
            PaycheckCadence::Irregular
        );
    }

    #[test]
    fn test_strict_schedules() {
        assert_eq!(cadence_from_dates(&every(start(), 7, 8), 20.0), PaycheckCadence::Weekly);
        assert_eq!(cadence_from_dates(&every(start(), 14, 5), 20.0), PaycheckCadence::Biweekly);
        assert_eq!(cadence_from_dates(&every(start(), 30, 3), 20.0), PaycheckCadence::Monthly);
        assert_eq!(cadence_from_dates(&every(start(), 60, 3), 20.0), PaycheckCadence::Irregular);
    }

    #[test]
    fn test_calendar_monthly_pay() {
        let dates: Vec<NaiveDate> = (1..=4)
            .map(|m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap())
            .collect();
        // Gaps 31, 29, 31
        assert_eq!(cadence_from_dates(&dates, 20.0), PaycheckCadence::Monthly);
    }

    #[test]
    fn test_semi_monthly_overlap_resolves_to_biweekly() {
        // 1st and 15th of each month average ~15 days, inside the 14-day band
        let dates: Vec<NaiveDate> = (1..=3)
            .flat_map(|m| {
                [
                    NaiveDate::from_ymd_opt(2024, m, 1).unwrap(),
                    NaiveDate::from_ymd_opt(2024, m, 15).unwrap(),
                ]
            })
            .collect();
        assert_eq!(cadence_from_dates(&dates, 20.0), PaycheckCadence::Biweekly);
    }

    #[test]
    fn test_semi_monthly_outside_biweekly_band() {
        // Average gap 17.5 is outside 11.2..=16.8 but inside 12..=18
        let dates = [
            start(),
            start() + Duration::days(17),
            start() + Duration::days(35),
        ];
        assert_eq!(cadence_from_dates(&dates, 20.0), PaycheckCadence::SemiMonthly);
    }

    #[test]
    fn test_unsorted_input() {
        let mut dates = every(start(), 14, 4);
        dates.reverse();
        assert_eq!(cadence_from_dates(&dates, 20.0), PaycheckCadence::Biweekly);
    }

    #[test]
    fn test_from_transactions() {
        let txs: Vec<Transaction> = every(start(), 7, 4)
            .into_iter()
            .map(|d| Transaction::new(d, 90000, "Cozy Earth"))
            .collect();
        let refs: Vec<&Transaction> = txs.iter().collect();
        assert_eq!(detect_paycheck_cadence(&refs), PaycheckCadence::Weekly);
        assert_eq!(detect_paycheck_cadence(&refs[..2]), PaycheckCadence::Irregular);
    }
}

//! Statistical primitives for baselining
//!
//! All functions are total: empty input degrades to `0.0` (or `Low` for
//! confidence) rather than failing. The one contract violation is passing
//! percentile bounds outside `[0, 100]` to [`winsorized_mean`], which panics.

use serde::{Deserialize, Serialize};

use crate::models::ConfidenceLevel;

/// Arithmetic mean, `0.0` for empty input
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median with midpoint averaging for even counts, `0.0` for empty input
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation (n - 1 denominator), `0.0` below two values
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let avg = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Mean after clipping every value into the percentile bounds of the series
///
/// Bounds are read from a sorted copy at `floor(n * lower / 100)` and
/// `ceil(n * upper / 100)`, both clamped to the valid index range. Clipping
/// never moves a value outside the observed min/max.
///
/// # Panics
///
/// Panics if either percentile is outside `[0, 100]` or `lower_pct > upper_pct`.
pub fn winsorized_mean(values: &[f64], lower_pct: f64, upper_pct: f64) -> f64 {
    assert!(
        (0.0..=100.0).contains(&lower_pct) && (0.0..=100.0).contains(&upper_pct),
        "winsorizing percentiles must be within [0, 100], got {lower_pct}/{upper_pct}"
    );
    assert!(
        lower_pct <= upper_pct,
        "lower percentile {lower_pct} exceeds upper percentile {upper_pct}"
    );

    match values.len() {
        0 => return 0.0,
        1 => return values[0],
        _ => {}
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let last = n - 1;
    let lower_index = ((n as f64 * lower_pct / 100.0).floor() as usize).min(last);
    let upper_index = ((n as f64 * upper_pct / 100.0).ceil() as usize).min(last);

    let lower_bound = sorted[lower_index];
    let upper_bound = sorted[upper_index];

    let clipped: Vec<f64> = values
        .iter()
        .map(|v| v.clamp(lower_bound, upper_bound))
        .collect();
    mean(&clipped)
}

/// Exponential moving average seeded with the first value
///
/// `alpha` weights the newest observation; `0.0` for empty input.
pub fn exponential_moving_average(values: &[f64], alpha: f64) -> f64 {
    let Some((first, rest)) = values.split_first() else {
        return 0.0;
    };

    rest.iter()
        .fold(*first, |ema, v| alpha * v + (1.0 - alpha) * ema)
}

/// Whether `value` lies within `tolerance_percent` of `target`
///
/// A zero target has no relative band, so the tolerance is applied as an
/// absolute distance of `tolerance_percent / 100`.
pub fn is_within_tolerance(value: f64, target: f64, tolerance_percent: f64) -> bool {
    if target == 0.0 {
        return value.abs() <= tolerance_percent / 100.0;
    }
    (value - target).abs() <= (target * tolerance_percent / 100.0).abs()
}

/// Series shorter than this are always `Low`, whatever the thresholds say
pub const MIN_CONFIDENCE_OBSERVATIONS: usize = 3;

/// Coefficient-of-variation cutoffs for [`confidence_level_with`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    /// CV strictly below this is `High`
    pub high_cv: f64,
    /// CV strictly below this (and not `High`) is `Medium`
    pub medium_cv: f64,
    /// Means with a magnitude below this count as zero
    pub zero_epsilon: f64,
    /// Fewer observations than this are always `Low` (never below 3)
    pub min_observations: usize,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high_cv: 0.15,
            medium_cv: 0.40,
            zero_epsilon: 0.01,
            min_observations: 3,
        }
    }
}

/// Confidence in a series of monthly amounts, using default thresholds
pub fn confidence_level(values: &[f64]) -> ConfidenceLevel {
    confidence_level_with(values, &ConfidenceThresholds::default())
}

/// Confidence in a series of monthly amounts
///
/// Short series and near-zero means are `Low`; otherwise the coefficient of
/// variation (sample standard deviation over absolute mean) picks the level.
pub fn confidence_level_with(values: &[f64], thresholds: &ConfidenceThresholds) -> ConfidenceLevel {
    if values.len() < thresholds.min_observations.max(MIN_CONFIDENCE_OBSERVATIONS) {
        return ConfidenceLevel::Low;
    }

    let avg = mean(values);
    if avg.abs() < thresholds.zero_epsilon {
        return ConfidenceLevel::Low;
    }

    let cv = standard_deviation(values) / avg.abs();
    if cv < thresholds.high_cv {
        ConfidenceLevel::High
    } else if cv < thresholds.medium_cv {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_mean_and_median() {
        assert_eq!(mean(&[]), 0.0);
        assert!((mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < EPS);

        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[5.0, 1.0, 3.0]), 3.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_standard_deviation_is_sample() {
        assert_eq!(standard_deviation(&[]), 0.0);
        assert_eq!(standard_deviation(&[42.0]), 0.0);
        // Deviations from mean 5: 9,1,1,1,0,0,4,16 = 32 over n-1 = 7
        let sd = standard_deviation(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((sd - (32.0f64 / 7.0).sqrt()).abs() < EPS);
    }

    #[test]
    fn test_winsorized_mean_full_range_is_mean() {
        let values = [3.0, 100.0, -7.5, 12.0, 0.0];
        assert!((winsorized_mean(&values, 0.0, 100.0) - mean(&values)).abs() < EPS);
    }

    #[test]
    fn test_winsorized_mean_single_and_empty() {
        assert_eq!(winsorized_mean(&[], 10.0, 90.0), 0.0);
        assert_eq!(winsorized_mean(&[123.45], 10.0, 90.0), 123.45);
        assert_eq!(winsorized_mean(&[123.45], 50.0, 50.0), 123.45);
    }

    #[test]
    fn test_winsorized_mean_three_values_unclipped() {
        // floor(0.3) = 0 and ceil(2.7) clamps to 2, so bounds are min/max
        let values = [10000.0, 11000.0, 9000.0];
        assert!((winsorized_mean(&values, 10.0, 90.0) - 10000.0).abs() < EPS);
    }

    #[test]
    fn test_winsorized_mean_clips_outliers() {
        // n = 10: lower index 1 (value 2), upper index ceil(9.0) = 9 (value 1000)
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 1000.0];
        let expected = (2.0 + 2.0 + 3.0 + 4.0 + 5.0 + 6.0 + 7.0 + 8.0 + 9.0 + 1000.0) / 10.0;
        assert!((winsorized_mean(&values, 10.0, 90.0) - expected).abs() < EPS);

        // Tighter upper bound: index ceil(8.0) = 8 (value 9)
        let expected = (2.0 + 2.0 + 3.0 + 4.0 + 5.0 + 6.0 + 7.0 + 8.0 + 9.0 + 9.0) / 10.0;
        assert!((winsorized_mean(&values, 10.0, 80.0) - expected).abs() < EPS);
    }

    #[test]
    #[should_panic(expected = "within [0, 100]")]
    fn test_winsorized_mean_rejects_out_of_range() {
        winsorized_mean(&[1.0, 2.0], -5.0, 90.0);
    }

    #[test]
    #[should_panic(expected = "exceeds upper percentile")]
    fn test_winsorized_mean_rejects_inverted_bounds() {
        winsorized_mean(&[1.0, 2.0], 90.0, 10.0);
    }

    #[test]
    fn test_exponential_moving_average() {
        assert_eq!(exponential_moving_average(&[], 0.5), 0.0);
        assert_eq!(exponential_moving_average(&[8.0], 0.5), 8.0);
        // 10 -> 0.5*20 + 0.5*10 = 15 -> 0.5*30 + 0.5*15 = 22.5
        assert!((exponential_moving_average(&[10.0, 20.0, 30.0], 0.5) - 22.5).abs() < EPS);
    }

    #[test]
    fn test_is_within_tolerance() {
        assert!(is_within_tolerance(14.0, 14.0, 20.0));
        assert!(is_within_tolerance(16.5, 14.0, 20.0));
        assert!(!is_within_tolerance(17.0, 14.0, 20.0));
        assert!(is_within_tolerance(-95.0, -100.0, 10.0));

        // Zero target uses the percent as an absolute distance
        assert!(is_within_tolerance(0.1, 0.0, 20.0));
        assert!(!is_within_tolerance(0.3, 0.0, 20.0));
    }

    #[test]
    fn test_confidence_level_boundaries() {
        assert_eq!(confidence_level(&[]), ConfidenceLevel::Low);
        assert_eq!(confidence_level(&[100.0, 100.0]), ConfidenceLevel::Low);
        assert_eq!(confidence_level(&[0.0, 0.0, 0.0]), ConfidenceLevel::Low);
        assert_eq!(confidence_level(&[100.0, -100.0, 0.0]), ConfidenceLevel::Low);
        assert_eq!(
            confidence_level(&[10000.0, 11000.0, 9000.0]),
            ConfidenceLevel::High
        );
        // mean 100, sd ~26.5 -> cv ~0.26
        assert_eq!(
            confidence_level(&[70.0, 110.0, 120.0]),
            ConfidenceLevel::Medium
        );
        assert_eq!(confidence_level(&[10.0, 200.0, 50.0]), ConfidenceLevel::Low);
    }

    #[test]
    fn test_confidence_level_custom_thresholds() {
        let strict = ConfidenceThresholds {
            high_cv: 0.01,
            medium_cv: 0.05,
            zero_epsilon: 0.01,
            min_observations: 4,
        };
        assert_eq!(
            confidence_level_with(&[10000.0, 11000.0, 9000.0], &strict),
            ConfidenceLevel::Low
        );
        assert_eq!(
            confidence_level_with(&[100.0, 100.0, 100.0, 100.0], &strict),
            ConfidenceLevel::High
        );
    }

    #[test]
    fn test_confidence_level_short_series_low_even_when_lowered() {
        let lax = ConfidenceThresholds {
            min_observations: 1,
            ..ConfidenceThresholds::default()
        };
        assert_eq!(confidence_level_with(&[10000.0, 10000.0], &lax), ConfidenceLevel::Low);
        assert_eq!(confidence_level_with(&[10000.0], &lax), ConfidenceLevel::Low);
        assert_eq!(
            confidence_level_with(&[10000.0, 10000.0, 10000.0], &lax),
            ConfidenceLevel::High
        );
    }
}

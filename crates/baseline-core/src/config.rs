//! Engine configuration
//!
//! Holds the reference timezone, aggregation parameters, and the income and
//! issuer whitelists the classifiers are built from.
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/budget-baseline/config/baseline.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::Deserialize;
use tracing::debug;

use crate::cadence::DEFAULT_CADENCE_TOLERANCE_PERCENT;
use crate::error::{Error, Result};
use crate::income::IncomeDetector;
use crate::stats::{ConfidenceThresholds, MIN_CONFIDENCE_OBSERVATIONS};
use crate::transfer::TransferClassifier;
use crate::windows::DateWindows;

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/baseline.toml");

/// Resolved engine settings
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineConfig {
    /// Zone that decides "today" and month boundaries
    pub timezone: Tz,
    /// Trailing calendar months, including the current partial month
    pub window_months: u32,
    pub lower_percentile: f64,
    pub upper_percentile: f64,
    pub cadence_tolerance_percent: f64,
    pub confidence: ConfidenceThresholds,
    /// Payer-name substrings that mark baseline income
    pub income_names: Vec<String>,
    /// Sub-category labels that mark baseline income
    pub income_categories: Vec<String>,
    /// Card issuers whose merchant rows are balance payments
    pub issuers: Vec<String>,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::Denver,
            window_months: 3,
            lower_percentile: 10.0,
            upper_percentile: 90.0,
            cadence_tolerance_percent: DEFAULT_CADENCE_TOLERANCE_PERCENT,
            confidence: ConfidenceThresholds::default(),
            income_names: to_strings(&["Cozy Eart Dir Dep", "Cozy Earth", "Mastercard Stipend"]),
            income_categories: to_strings(&["Payroll", "Salary", "Income Wages", "Paycheck"]),
            issuers: to_strings(&[
                "American Express",
                "Amex",
                "Chase",
                "JPMorgan",
                "Capital One",
                "Citi",
                "Citibank",
                "Discover",
                "Bank of America",
                "Wells Fargo",
                "US Bank",
                "Barclays",
            ]),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl BaselineConfig {
    /// Load from the data-dir override if present, else embedded defaults
    pub fn load() -> Result<(Self, ConfigSource)> {
        Self::load_from(None)
    }

    /// Load from an explicit path (which must exist), the data-dir override,
    /// or the embedded defaults, in that order
    pub fn load_from(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok((Self::from_file(path)?, ConfigSource::File(path.to_path_buf())));
        }

        if let Some(default_path) = default_config_path() {
            if default_path.exists() {
                let config = Self::from_file(&default_path)?;
                return Ok((config, ConfigSource::File(default_path)));
            }
        }

        debug!("Using embedded baseline config");
        Ok((Self::from_toml(DEFAULT_CONFIG)?, ConfigSource::Embedded))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading baseline config from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse TOML, applying present keys over the defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(window) = raw.window {
            if let Some(tz) = window.timezone {
                config.timezone = DateWindows::from_name(&tz)?.timezone();
            }
            if let Some(months) = window.months {
                config.window_months = months;
            }
        }

        if let Some(aggregation) = raw.aggregation {
            if let Some(lower) = aggregation.lower_percentile {
                config.lower_percentile = lower;
            }
            if let Some(upper) = aggregation.upper_percentile {
                config.upper_percentile = upper;
            }
        }

        if let Some(tolerance) = raw.cadence.and_then(|c| c.tolerance_percent) {
            config.cadence_tolerance_percent = tolerance;
        }

        if let Some(confidence) = raw.confidence {
            if let Some(high) = confidence.high_cv {
                config.confidence.high_cv = high;
            }
            if let Some(medium) = confidence.medium_cv {
                config.confidence.medium_cv = medium;
            }
            if let Some(epsilon) = confidence.zero_epsilon {
                config.confidence.zero_epsilon = epsilon;
            }
            if let Some(min) = confidence.min_observations {
                config.confidence.min_observations = min;
            }
        }

        if let Some(income) = raw.income {
            if let Some(names) = income.names {
                config.income_names = names;
            }
            if let Some(categories) = income.categories {
                config.income_categories = categories;
            }
        }

        if let Some(issuers) = raw.transfers.and_then(|t| t.issuers) {
            config.issuers = issuers;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot honor
    pub fn validate(&self) -> Result<()> {
        let in_range = |p: f64| (0.0..=100.0).contains(&p);
        if !in_range(self.lower_percentile) || !in_range(self.upper_percentile) {
            return Err(Error::Config(format!(
                "Percentiles must be within [0, 100], got {}/{}",
                self.lower_percentile, self.upper_percentile
            )));
        }
        if self.lower_percentile > self.upper_percentile {
            return Err(Error::Config(format!(
                "Lower percentile {} exceeds upper percentile {}",
                self.lower_percentile, self.upper_percentile
            )));
        }
        if self.window_months == 0 {
            return Err(Error::Config("Window must cover at least one month".into()));
        }
        if self.cadence_tolerance_percent.is_nan() || self.cadence_tolerance_percent < 0.0 {
            return Err(Error::Config(format!(
                "Cadence tolerance must be non-negative, got {}",
                self.cadence_tolerance_percent
            )));
        }
        let c = &self.confidence;
        if c.min_observations < MIN_CONFIDENCE_OBSERVATIONS {
            return Err(Error::Config(format!(
                "Confidence needs at least {} observations, got {}",
                MIN_CONFIDENCE_OBSERVATIONS, c.min_observations
            )));
        }
        let ordered = c.high_cv > 0.0 && c.high_cv <= c.medium_cv;
        if !ordered || c.zero_epsilon.is_nan() || c.zero_epsilon < 0.0 {
            return Err(Error::Config(format!(
                "Confidence thresholds must satisfy 0 < high_cv <= medium_cv, got {}/{}",
                c.high_cv, c.medium_cv
            )));
        }
        Ok(())
    }

    pub fn date_windows(&self) -> DateWindows {
        DateWindows::new(self.timezone)
    }

    pub fn transfer_classifier(&self) -> TransferClassifier {
        TransferClassifier::new(&self.issuers)
    }

    pub fn income_detector(&self) -> IncomeDetector {
        IncomeDetector::new(
            &self.income_names,
            self.income_categories.iter().cloned(),
            self.transfer_classifier(),
        )
    }

    /// Timezone name, e.g. "America/Denver"
    pub fn timezone_name(&self) -> &'static str {
        self.timezone.name()
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| {
        d.join("budget-baseline")
            .join("config")
            .join("baseline.toml")
    })
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    window: Option<RawWindow>,
    aggregation: Option<RawAggregation>,
    cadence: Option<RawCadence>,
    confidence: Option<RawConfidence>,
    income: Option<RawIncome>,
    transfers: Option<RawTransfers>,
}

#[derive(Debug, Deserialize)]
struct RawWindow {
    timezone: Option<String>,
    months: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawAggregation {
    lower_percentile: Option<f64>,
    upper_percentile: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawCadence {
    tolerance_percent: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawConfidence {
    high_cv: Option<f64>,
    medium_cv: Option<f64>,
    zero_epsilon: Option<f64>,
    min_observations: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawIncome {
    names: Option<Vec<String>>,
    categories: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawTransfers {
    issuers: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windows::DEFAULT_TIMEZONE;
    use std::io::Write;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = BaselineConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, BaselineConfig::default());
        assert_eq!(config.timezone_name(), DEFAULT_TIMEZONE);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = BaselineConfig::from_toml("").unwrap();
        assert_eq!(config, BaselineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = BaselineConfig::from_toml(
            r#"
            [window]
            timezone = "Europe/Berlin"
            months = 6

            [income]
            names = ["Globex Payroll"]
            "#,
        )
        .unwrap();

        assert_eq!(config.timezone_name(), "Europe/Berlin");
        assert_eq!(config.window_months, 6);
        assert_eq!(config.income_names, vec!["Globex Payroll".to_string()]);
        // Untouched sections keep their defaults
        assert_eq!(config.income_categories.len(), 4);
        assert_eq!(config.upper_percentile, 90.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            BaselineConfig::from_toml("[window]\ntimezone = \"Nowhere/Special\""),
            Err(Error::Timezone(_))
        ));
        assert!(matches!(
            BaselineConfig::from_toml("[aggregation]\nlower_percentile = 95.0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            BaselineConfig::from_toml("[aggregation]\nupper_percentile = 120.0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            BaselineConfig::from_toml("[window]\nmonths = 0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            BaselineConfig::from_toml("[confidence]\nhigh_cv = 0.5"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            BaselineConfig::from_toml("[confidence]\nmin_observations = 1"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            BaselineConfig::from_toml("not = [valid"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_raised_min_observations_accepted() {
        let config = BaselineConfig::from_toml("[confidence]\nmin_observations = 4").unwrap();
        assert_eq!(config.confidence.min_observations, 4);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[transfers]\nissuers = [\"Synchrony\"]").unwrap();

        let (config, source) = BaselineConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.issuers, vec!["Synchrony".to_string()]);
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            BaselineConfig::load_from(Some(&missing)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_builds_classifiers() {
        let config = BaselineConfig::default();
        assert_eq!(config.transfer_classifier().issuers().len(), 12);
        assert_eq!(config.date_windows().timezone(), chrono_tz::America::Denver);
    }
}

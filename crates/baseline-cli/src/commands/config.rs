//! Effective configuration display

use std::path::Path;

use anyhow::Result;
use baseline_core::config::default_config_path;

use super::core::load_config;

pub fn cmd_config(config_path: Option<&Path>) -> Result<()> {
    let (config, source) = load_config(config_path)?;

    println!();
    println!("⚙️  Baseline Configuration");
    println!("   Source: {}", source);
    if let Some(path) = default_config_path() {
        println!("   Override path: {}", path.display());
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Timezone:            {}", config.timezone_name());
    println!("   Window:              {} months", config.window_months);
    println!(
        "   Winsorizing:         {}th to {}th percentile",
        config.lower_percentile, config.upper_percentile
    );
    println!("   Cadence tolerance:   {}%", config.cadence_tolerance_percent);
    println!(
        "   Confidence (CV):     high < {}, medium < {}, min {} months",
        config.confidence.high_cv, config.confidence.medium_cv, config.confidence.min_observations
    );
    println!();
    println!("   Income names:        {}", config.income_names.join(", "));
    println!("   Income categories:   {}", config.income_categories.join(", "));
    println!("   Card issuers:        {}", config.issuers.join(", "));

    Ok(())
}

//! Baseline and snapshot report commands

use std::path::Path;

use anyhow::Result;
use baseline_core::{BaselineCalculator, BudgetBaseline, MonthSnapshot};

use super::core::{format_cents, load_config, load_store, resolve_today};
use super::truncate;

pub fn cmd_compute(
    config_path: Option<&Path>,
    file: &Path,
    user_id: i64,
    as_of: Option<&str>,
    json: bool,
) -> Result<()> {
    let (config, _) = load_config(config_path)?;
    let today = resolve_today(as_of, &config)?;
    let store = load_store(file, user_id)?;

    let calc = BaselineCalculator::with_config(&store, config);
    let window = calc.window_for(today);
    let baseline = calc.calculate_baseline_as_of(user_id, today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&baseline)?);
        return Ok(());
    }

    print_baseline(&baseline, &window.to_string());
    Ok(())
}

pub fn cmd_snapshot(
    config_path: Option<&Path>,
    file: &Path,
    user_id: i64,
    as_of: Option<&str>,
    json: bool,
) -> Result<()> {
    let (config, _) = load_config(config_path)?;
    let today = resolve_today(as_of, &config)?;
    let store = load_store(file, user_id)?;

    let calc = BaselineCalculator::with_config(&store, config);
    let snapshot = calc.month_snapshot_as_of(user_id, today)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print_snapshot(&snapshot, today);
    Ok(())
}

fn print_baseline(baseline: &BudgetBaseline, window: &str) {
    println!();
    println!("📊 Budget Baseline");
    println!("   Window: {}", window);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Monthly income:   {:>12}",
        format_cents(baseline.monthly_income_cents)
    );
    println!(
        "   Monthly expenses: {:>12}",
        format_cents(baseline.total_monthly_expenses_cents)
    );
    println!(
        "   Surplus:          {:>12}",
        format_cents(baseline.monthly_surplus_cents())
    );
    println!("   Paycheck cadence: {}", baseline.paycheck_cadence);
    println!();

    if baseline.monthly_expenses_by_category.is_empty() {
        println!("   No spending found in this window.");
        return;
    }

    println!("   {:25} │ {:>12} │ {:>10}", "Category", "Monthly", "Confidence");
    println!("   ──────────────────────────┼──────────────┼────────────");
    for (category, cents) in &baseline.monthly_expenses_by_category {
        let confidence = baseline
            .category_confidence_scores
            .get(category)
            .map(|c| c.as_str())
            .unwrap_or("-");
        println!(
            "   {:25} │ {:>12} │ {:>10}",
            truncate(category, 25),
            format_cents(*cents),
            confidence
        );
    }
}

fn print_snapshot(snapshot: &MonthSnapshot, today: chrono::NaiveDate) {
    println!();
    println!("📅 Month to Date ({})", snapshot.month);
    println!("   Through: {}", today);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income:    {:>12}", format_cents(snapshot.income_cents));
    println!("   Expenses:  {:>12}", format_cents(snapshot.total_expenses_cents));
    println!("   Net:       {:>12}", format_cents(snapshot.net_cash_flow_cents));
    println!("   Savings:   {:>12}", format_cents(snapshot.savings_cents));
    println!();

    if snapshot.expenses_by_category.is_empty() {
        println!("   No spending found this month.");
        return;
    }

    println!("   {:25} │ {:>12}", "Category", "Actual");
    println!("   ──────────────────────────┼──────────────");
    for (category, cents) in &snapshot.expenses_by_category {
        println!("   {:25} │ {:>12}", truncate(category, 25), format_cents(*cents));
    }
}

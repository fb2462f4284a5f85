//! Full wellness report command

use std::path::Path;

use anyhow::Result;
use finwell_core::{format_currency, format_percent, WellnessReport};

use super::insights::print_insights;
use super::risk::print_risk;
use super::{load_snapshot, truncate, RunContext};

pub fn cmd_report(ctx: &RunContext, file: &Path, json: bool) -> Result<()> {
    let snapshot = load_snapshot(file)?;
    let report = ctx.analyzer.analyze(&snapshot, ctx.today);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &WellnessReport) {
    let monthly = &report.aggregation.monthly;

    println!();
    println!("🌱 Financial Wellness Report (as of {})", report.as_of);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Transactions: {}", report.transaction_count);
    if report.skipped_records > 0 {
        println!("   ⚠️  Skipped {} malformed record(s)", report.skipped_records);
    }
    println!("   Net worth:    {}", format_currency(report.net_worth));
    println!(
        "   This month:   {} ({} vs last month)",
        format_currency(monthly.current_month_total),
        monthly.percent_change_label()
    );

    if !report.top_categories.is_empty() {
        println!();
        println!("📊 Top Categories");
        for share in &report.top_categories {
            println!(
                "   {:25} │ {:>12} │ {:>6}",
                truncate(&share.category, 25),
                format_currency(share.amount),
                format_percent(share.percent)
            );
        }
    }

    if !report.insights.is_empty() {
        println!();
        println!("💡 Insights");
        print_insights(&report.insights);
    }

    let alerts = &report.alerts;
    if alerts.spending_alert.is_some()
        || alerts.savings_opportunity.is_some()
        || !alerts.upcoming_bills.is_empty()
    {
        println!();
        println!("🔔 Smart Alerts");
        if let Some(alert) = &alerts.spending_alert {
            println!("   ⚠️  {}", alert.message);
        }
        for bill in &alerts.upcoming_bills {
            println!(
                "   📅 {} {} due {}",
                bill.name,
                format_currency(bill.amount),
                bill.due
            );
        }
        if let Some(saving) = &alerts.savings_opportunity {
            println!("   💰 {}", saving.message);
        }
    }

    println!();
    println!("🎯 Risk Profile");
    print_risk(report.profile.as_ref(), &report.risk);

    if !report.goals.is_empty() {
        println!();
        println!("🏁 Goals");
        for goal in &report.goals {
            println!(
                "   {:25} │ {:>12} / {:>12} │ {:>6}",
                truncate(&goal.name, 25),
                format_currency(goal.current),
                format_currency(goal.target),
                format_percent(goal.percent)
            );
        }
    }
}

//! Insight and category commands

use std::path::Path;

use anyhow::Result;
use finwell_core::{format_currency, Insight};

use super::{load_snapshot, truncate, RunContext};

pub fn cmd_insights(ctx: &RunContext, file: &Path, json: bool) -> Result<()> {
    let snapshot = load_snapshot(file)?;
    let batch = ctx.analyzer.normalize(&snapshot);
    let insights = ctx.analyzer.insights(&batch, ctx.today);

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!();
    println!("💡 Spending Insights (as of {})", ctx.today);
    println!("   ─────────────────────────────────────────────────────────────");
    if batch.skipped > 0 {
        println!("   ⚠️  Skipped {} malformed record(s)", batch.skipped);
    }

    if insights.is_empty() {
        println!("   No transactions to analyze.");
        return Ok(());
    }

    print_insights(&insights);
    Ok(())
}

pub(crate) fn print_insights(insights: &[Insight]) {
    for (i, insight) in insights.iter().enumerate() {
        println!();
        println!("   {}. {}", i + 1, insight.title);
        println!("      {}", insight.description);
        println!("      \x1b[2m{}\x1b[0m", insight.explanation);
    }
}

pub fn cmd_categories(ctx: &RunContext, file: &Path, top: Option<usize>, json: bool) -> Result<()> {
    let snapshot = load_snapshot(file)?;
    let batch = ctx.analyzer.normalize(&snapshot);
    let aggregation = ctx.analyzer.aggregator().aggregate(&batch.transactions, ctx.today);
    let ranked = ctx.analyzer.ranked_categories(&aggregation, top);

    if json {
        let output = serde_json::json!({
            "categories": ranked,
            "monthly": aggregation.monthly,
            "total": aggregation.categories.total(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let monthly = &aggregation.monthly;

    println!();
    println!("📊 Spending by Category");
    println!(
        "   Predicate: {}",
        ctx.analyzer.aggregator().config().expense_predicate
    );
    println!("   ─────────────────────────────────────────────────────────────");

    if ranked.is_empty() {
        println!("   No spending found.");
        return Ok(());
    }

    println!("   Total: {}", format_currency(aggregation.categories.total()));
    println!();
    println!("   {:25} │ {:>12} │ {:>6}", "Category", "Amount", "%");
    println!("   ──────────────────────────┼──────────────┼────────");
    for share in &ranked {
        println!(
            "   {:25} │ {:>12} │ {:>5.1}%",
            truncate(&share.category, 25),
            format_currency(share.amount),
            share.percent
        );
    }

    println!();
    println!(
        "   This month ({}): {}",
        monthly.current_month,
        format_currency(monthly.current_month_total)
    );
    println!(
        "   Last month ({}): {}",
        monthly.current_month.previous(),
        format_currency(monthly.last_month_total)
    );
    println!("   Change: {}", monthly.percent_change_label());

    Ok(())
}

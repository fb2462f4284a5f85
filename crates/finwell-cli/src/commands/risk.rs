//! Risk profile command

use std::path::Path;

use anyhow::Result;
use finwell_core::{format_currency, AllocationStrategy, RiskAssessment, UserFinancialProfile};

use super::{load_snapshot, RunContext};

pub fn cmd_risk(ctx: &RunContext, file: &Path, json: bool) -> Result<()> {
    let snapshot = load_snapshot(file)?;
    let batch = ctx.analyzer.normalize(&snapshot);
    let (profile, assessment) = ctx.analyzer.risk(&snapshot, &batch);

    if json {
        let output = serde_json::json!({
            "profile": profile,
            "assessment": assessment,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("🎯 Investment Risk Profile");
    println!("   ─────────────────────────────────────────────────────────────");
    print_risk(profile.as_ref(), &assessment);
    Ok(())
}

pub(crate) fn print_risk(profile: Option<&UserFinancialProfile>, assessment: &RiskAssessment) {
    if let Some(p) = profile {
        println!("   Age:        {}", p.age);
        println!("   Occupation: {}", p.occupation);
        println!("   Income:     {}/month", format_currency(p.monthly_income));
        println!("   Expenses:   {}/month", format_currency(p.monthly_expenses));
        println!();
    }

    let marker = if assessment.insufficient_data { " (default)" } else { "" };
    println!("   Risk level: {}{}", assessment.level, marker);
    println!("   Reason:     {}", assessment.reason);
    println!();
    print_allocation(&assessment.allocation);
}

fn print_allocation(allocation: &AllocationStrategy) {
    println!("   {:15} │ {:>5} │", "Asset", "%");
    println!("   ────────────────┼───────┼──────────────────────");
    for (name, percent) in allocation.entries() {
        let bar = "█".repeat((percent / 5) as usize);
        println!("   {:15} │ {:>4}% │ {}", name, percent, bar);
    }
}

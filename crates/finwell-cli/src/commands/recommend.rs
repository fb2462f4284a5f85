//! AI recommendation command

use std::path::Path;

use anyhow::{bail, Context, Result};
use finwell_core::{format_currency, AIBackend, AIClient, Recommendation};

use super::{load_snapshot, RunContext};

pub async fn cmd_recommend(
    ctx: &RunContext,
    file: &Path,
    goals: &[String],
    json: bool,
) -> Result<()> {
    let Some(client) = AIClient::from_env() else {
        bail!(
            "No AI backend configured. Set OPENAI_COMPATIBLE_HOST (and optionally \
             OPENAI_COMPATIBLE_MODEL, OPENAI_COMPATIBLE_API_KEY), or AI_BACKEND=mock"
        );
    };

    recommend_with_client(ctx, &client, file, goals, json).await
}

/// Generate and print recommendations with an already-configured backend
pub async fn recommend_with_client(
    ctx: &RunContext,
    client: &AIClient,
    file: &Path,
    goals: &[String],
    json: bool,
) -> Result<()> {
    let snapshot = load_snapshot(file)?;
    let request = ctx.analyzer.recommendation_request(&snapshot, goals);

    if !json {
        println!();
        println!("🤖 Generating recommendations...");
        println!("   Backend: {} ({})", client.host(), client.model());
        println!(
            "   Income: {}  Risk tolerance: {}",
            request
                .monthly_income
                .map(format_currency)
                .unwrap_or_else(|| "unknown".to_string()),
            request.risk_tolerance
        );
    }

    let recommendations = client
        .generate_recommendations(&request)
        .await
        .context("Failed to generate recommendations")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    print_recommendations(&recommendations);
    Ok(())
}

fn print_recommendations(recommendations: &[Recommendation]) {
    println!("   ─────────────────────────────────────────────────────────────");
    for rec in recommendations {
        println!();
        println!(
            "   [P{}] {} ({})",
            rec.priority, rec.title, rec.recommendation_type
        );
        println!("        {}", rec.description);
    }
}

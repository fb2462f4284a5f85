//! Finwell CLI - Financial wellness insights
//!
//! Usage:
//!   finwell insights data.json        Four spending insights
//!   finwell categories data.csv       Spending by category
//!   finwell risk data.json            Risk profile and allocation
//!   finwell report data.json --json   Full wellness report
//!   finwell serve --port 3000         Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Insights { file, json } => {
            let ctx = commands::RunContext::new(config_path, cli.as_of.as_deref())?;
            commands::cmd_insights(&ctx, &file, json)
        }
        Commands::Categories { file, top, json } => {
            let ctx = commands::RunContext::new(config_path, cli.as_of.as_deref())?;
            commands::cmd_categories(&ctx, &file, top, json)
        }
        Commands::Risk { file, json } => {
            let ctx = commands::RunContext::new(config_path, cli.as_of.as_deref())?;
            commands::cmd_risk(&ctx, &file, json)
        }
        Commands::Report { file, json } => {
            let ctx = commands::RunContext::new(config_path, cli.as_of.as_deref())?;
            commands::cmd_report(&ctx, &file, json)
        }
        Commands::Recommend { file, goals, json } => {
            let ctx = commands::RunContext::new(config_path, cli.as_of.as_deref())?;
            commands::cmd_recommend(&ctx, &file, &goals, json).await
        }
        Commands::Config { action } => match action {
            None | Some(ConfigAction::Show) => commands::cmd_config_show(config_path),
            Some(ConfigAction::Path) => commands::cmd_config_path(),
        },
        Commands::Serve { port, host } => commands::cmd_serve(config_path, &host, port).await,
    }
}

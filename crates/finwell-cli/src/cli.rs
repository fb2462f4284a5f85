//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Finwell - Turn transaction history into financial insights
#[derive(Parser)]
#[command(name = "finwell")]
#[command(about = "Financial wellness insights from your transaction history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Analysis config file (TOML)
    ///
    /// Defaults to ~/.local/share/finwell/config/finwell.toml if present,
    /// otherwise the built-in configuration.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Date treated as "today" for month-over-month comparisons (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub as_of: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the four spending insights for a snapshot
    Insights {
        /// Snapshot file (JSON) or transaction export (CSV)
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show spending by category with month-over-month totals
    Categories {
        /// Snapshot file (JSON) or transaction export (CSV)
        file: PathBuf,

        /// Number of categories before folding the rest into "Others"
        #[arg(short, long)]
        top: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify investment risk profile and show the suggested allocation
    Risk {
        /// Snapshot file (JSON) with a profile
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Full wellness report (insights, alerts, risk, net worth, goals)
    Report {
        /// Snapshot file (JSON) or transaction export (CSV)
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate personalized recommendations with the AI backend
    ///
    /// Configure with AI_BACKEND, OPENAI_COMPATIBLE_HOST, OPENAI_COMPATIBLE_MODEL,
    /// and OPENAI_COMPATIBLE_API_KEY.
    Recommend {
        /// Snapshot file (JSON) or transaction export (CSV)
        file: PathBuf,

        /// Additional goal to consider (repeatable)
        #[arg(short, long = "goal")]
        goals: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect the analysis configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config override location
    Path,
}

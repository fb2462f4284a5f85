//! Shared command setup: configuration, "today", snapshot loading

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use finwell_core::{AnalysisConfig, Analyzer, FinancialSnapshot};

/// Everything a command needs to run an analysis
pub struct RunContext {
    pub analyzer: Analyzer,
    pub today: NaiveDate,
}

impl RunContext {
    pub fn new(config_path: Option<&Path>, as_of: Option<&str>) -> Result<Self> {
        let analyzer = Analyzer::new(load_config(config_path)?);
        let today = resolve_today(as_of)?;
        tracing::debug!(%today, "Analysis date");
        Ok(Self { analyzer, today })
    }
}

pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    AnalysisConfig::load(path).context("Failed to load analysis config")
}

/// Parse `--as-of`, defaulting to the local date
pub fn resolve_today(as_of: Option<&str>) -> Result<NaiveDate> {
    match as_of {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid --as-of date format (use YYYY-MM-DD)"),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn load_snapshot(path: &Path) -> Result<FinancialSnapshot> {
    FinancialSnapshot::load(path)
        .with_context(|| format!("Failed to load snapshot from {}", path.display()))
}

//! Analysis configuration
//!
//! Thresholds, keyword tables, allocation percentages, and text parameters used
//! by the aggregator, insight generator, risk classifier, and smart alerts.
//!
//! ## Configuration Resolution
//!
//! 1. An explicit path (`--config`), which must exist
//! 2. Override in data dir (~/.local/share/finwell/config/finwell.toml)
//! 3. Embedded defaults (compiled into binary)
//!
//! Keys missing from a file keep their default values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::risk::{AllocationStrategy, RiskLevel};

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/finwell.toml");

/// Which transactions count toward spending totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpensePredicate {
    /// Expense and withdrawal transactions; uncategorized ones fall into the fallback bucket
    #[default]
    Spending,
    /// Any transaction with a category, regardless of type or sign
    Categorized,
}

impl ExpensePredicate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spending => "spending",
            Self::Categorized => "categorized",
        }
    }
}

impl std::str::FromStr for ExpensePredicate {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spending" => Ok(Self::Spending),
            "categorized" => Ok(Self::Categorized),
            _ => Err(format!("Unknown expense predicate: {}", s)),
        }
    }
}

impl std::fmt::Display for ExpensePredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings for the transaction aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    pub expense_predicate: ExpensePredicate,
    /// Bucket for spending without a category
    pub uncategorized_label: String,
    /// Bucket for categories past `top_categories` in ranked output
    pub others_label: String,
    pub top_categories: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            expense_predicate: ExpensePredicate::Spending,
            uncategorized_label: "Uncategorized".to_string(),
            others_label: "Others".to_string(),
            top_categories: 6,
        }
    }
}

/// Settings for the insight generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub largest_transactions: usize,
    pub example_transactions: usize,
    pub budget_reduction_percent: u32,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            largest_transactions: 3,
            example_transactions: 3,
            budget_reduction_percent: 20,
        }
    }
}

/// Allocation per risk level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationTable {
    pub low: AllocationStrategy,
    pub moderate: AllocationStrategy,
    pub high: AllocationStrategy,
}

impl AllocationTable {
    pub fn for_level(&self, level: RiskLevel) -> &AllocationStrategy {
        match level {
            RiskLevel::Low => &self.low,
            RiskLevel::Moderate => &self.moderate,
            RiskLevel::High => &self.high,
        }
    }
}

impl Default for AllocationTable {
    fn default() -> Self {
        Self {
            low: AllocationStrategy::new(20, 50, 20, 0, 10),
            moderate: AllocationStrategy::new(40, 30, 20, 5, 5),
            high: AllocationStrategy::new(60, 10, 15, 10, 5),
        }
    }
}

/// Settings for the risk profile classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Occupation keywords treated as stable employment (case-insensitive substring match)
    pub stable_jobs: Vec<String>,
    pub low_risk_min_age: u32,
    pub low_income_threshold: f64,
    pub high_expense_ratio: f64,
    pub high_risk_max_age: u32,
    pub high_income_threshold: f64,
    pub low_expense_ratio: f64,
    pub allocations: AllocationTable,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            stable_jobs: ["engineer", "doctor", "teacher", "professor", "manager"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            low_risk_min_age: 45,
            low_income_threshold: 5000.0,
            high_expense_ratio: 0.7,
            high_risk_max_age: 35,
            high_income_threshold: 8000.0,
            low_expense_ratio: 0.5,
            allocations: AllocationTable::default(),
        }
    }
}

/// A recurring bill estimated as a share of monthly income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillTemplate {
    pub name: String,
    pub income_share: f64,
    /// Display text for the due date (e.g., "25th")
    pub due: String,
}

/// Settings for dashboard smart alerts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    pub savings_reduction_rate: f64,
    pub bills: Vec<BillTemplate>,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            savings_reduction_rate: 0.2,
            bills: vec![
                BillTemplate {
                    name: "Rent/Mortgage".to_string(),
                    income_share: 0.3,
                    due: "25th".to_string(),
                },
                BillTemplate {
                    name: "Utilities".to_string(),
                    income_share: 0.05,
                    due: "15th".to_string(),
                },
            ],
        }
    }
}

/// Complete analysis configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub aggregation: AggregationConfig,
    pub insights: InsightConfig,
    pub risk: RiskConfig,
    pub alerts: AlertsConfig,
}

impl AnalysisConfig {
    /// Load configuration (explicit path, then override location, then embedded default)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "Loading analysis config");
            return Self::from_file(path);
        }

        if let Some(default_path) = default_config_path() {
            if default_path.exists() {
                tracing::debug!(path = %default_path.display(), "Loading config override");
                return Self::from_file(&default_path);
            }
        }

        Self::embedded()
    }

    /// The configuration compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML content
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Check invariants the analysis code relies on
    pub fn validate(&self) -> Result<()> {
        let agg = &self.aggregation;
        if agg.top_categories == 0 {
            return Err(Error::Config("top_categories must be at least 1".into()));
        }
        if agg.uncategorized_label.trim().is_empty() || agg.others_label.trim().is_empty() {
            return Err(Error::Config("Category labels must not be empty".into()));
        }

        if !(1..=100).contains(&self.insights.budget_reduction_percent) {
            return Err(Error::Config(
                "budget_reduction_percent must be between 1 and 100".into(),
            ));
        }

        let risk = &self.risk;
        for (name, ratio) in [
            ("high_expense_ratio", risk.high_expense_ratio),
            ("low_expense_ratio", risk.low_expense_ratio),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(Error::Config(format!("{} must be in (0, 1]", name)));
            }
        }
        for level in RiskLevel::all() {
            let total = risk.allocations.for_level(*level).total();
            if total != 100 {
                return Err(Error::Config(format!(
                    "{} risk allocation sums to {}, expected 100",
                    level, total
                )));
            }
        }

        let alerts = &self.alerts;
        if !(alerts.savings_reduction_rate > 0.0 && alerts.savings_reduction_rate <= 1.0) {
            return Err(Error::Config("savings_reduction_rate must be in (0, 1]".into()));
        }
        if let Some(bill) = alerts.bills.iter().find(|b| b.income_share < 0.0) {
            return Err(Error::Config(format!(
                "Bill '{}' has a negative income share",
                bill.name
            )));
        }

        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("finwell").join("config").join("finwell.toml"))
}

//! Core types for the insight generator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed catalogue of insight kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Month-over-month spending change
    SpendingChange,
    /// Highest-spending category
    TopCategory,
    /// Count and total of this month's transactions
    TransactionCount,
    /// Templated budget suggestion
    BudgetRecommendation,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::SpendingChange => "spending_change",
            InsightKind::TopCategory => "top_category",
            InsightKind::TransactionCount => "transaction_count",
            InsightKind::BudgetRecommendation => "budget_recommendation",
        }
    }

    /// Display title shared by every insight of this kind
    pub fn title(&self) -> &'static str {
        match self {
            InsightKind::SpendingChange => "Spending Patterns",
            InsightKind::TopCategory => "Category Breakdown",
            InsightKind::TransactionCount => "Recent Transactions",
            InsightKind::BudgetRecommendation => "Budget Recommendations",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spending_change" => Ok(InsightKind::SpendingChange),
            "top_category" => Ok(InsightKind::TopCategory),
            "transaction_count" => Ok(InsightKind::TransactionCount),
            "budget_recommendation" => Ok(InsightKind::BudgetRecommendation),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// A display-ready observation
///
/// `title` and `description` are always shown; `explanation` is the
/// supporting detail revealed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub explanation: String,
}

impl Insight {
    pub fn new(kind: InsightKind, description: String, explanation: String) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            description,
            explanation,
        }
    }
}

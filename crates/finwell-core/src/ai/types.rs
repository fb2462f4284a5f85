//! Types for AI-generated recommendations

use serde::{Deserialize, Serialize};

use crate::risk::RiskLevel;

/// Area a recommendation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Savings,
    Investment,
    Budgeting,
    Debt,
    Insurance,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::Savings => "savings",
            RecommendationType::Investment => "investment",
            RecommendationType::Budgeting => "budgeting",
            RecommendationType::Debt => "debt",
            RecommendationType::Insurance => "insurance",
        }
    }
}

impl std::str::FromStr for RecommendationType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "savings" | "saving" => Ok(RecommendationType::Savings),
            "investment" | "investing" => Ok(RecommendationType::Investment),
            "budgeting" | "budget" => Ok(RecommendationType::Budgeting),
            "debt" => Ok(RecommendationType::Debt),
            "insurance" => Ok(RecommendationType::Insurance),
            _ => Err(format!("Unknown recommendation type: {}", s)),
        }
    }
}

impl std::fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One personalized recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub recommendation_type: RecommendationType,
    /// 1 (most urgent) to 5
    pub priority: u8,
}

/// Financial data sent to the recommendation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub monthly_income: Option<f64>,
    pub risk_tolerance: RiskLevel,
    pub goals: Vec<String>,
    /// One line per transaction, newest first
    pub recent_transactions: Vec<String>,
}

//! Mock backend for testing
//!
//! Returns deterministic recommendations derived from the request, so the CLI
//! and server can be exercised without a running model server.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::risk::RiskLevel;

use super::types::{Recommendation, RecommendationRequest, RecommendationType};
use super::AIBackend;

/// Mock AI backend for testing
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true (and requests succeed)
    pub healthy: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self { healthy: true }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self { healthy: false }
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn generate_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>> {
        if !self.healthy {
            return Err(Error::Ai("Mock backend is unavailable".into()));
        }

        let savings_target = request
            .monthly_income
            .map(|income| format!("${:.0}", income * 0.2))
            .unwrap_or_else(|| "20% of your income".to_string());

        let investment = match request.risk_tolerance {
            RiskLevel::Low => "Favor bonds and high-yield savings to protect your principal.",
            RiskLevel::Moderate => "Split new contributions between index funds and bonds.",
            RiskLevel::High => "Put most new contributions into broad stock index funds.",
        };

        let mut recommendations = vec![
            Recommendation {
                title: "Build an emergency fund".to_string(),
                description: format!(
                    "Set aside {} each month until you cover three months of expenses.",
                    savings_target
                ),
                recommendation_type: RecommendationType::Savings,
                priority: 1,
            },
            Recommendation {
                title: "Review recurring spending".to_string(),
                description: "Cancel subscriptions you no longer use and set category budgets."
                    .to_string(),
                recommendation_type: RecommendationType::Budgeting,
                priority: 2,
            },
            Recommendation {
                title: "Match investments to your risk profile".to_string(),
                description: investment.to_string(),
                recommendation_type: RecommendationType::Investment,
                priority: 3,
            },
        ];

        if let Some(goal) = request.goals.first() {
            recommendations[2].description.push_str(&format!(" Keep '{}' in view.", goal));
        }

        Ok(recommendations)
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RecommendationRequest {
        RecommendationRequest {
            monthly_income: Some(5000.0),
            risk_tolerance: RiskLevel::Low,
            goals: vec!["Pay off car".to_string()],
            recent_transactions: vec![],
        }
    }

    #[tokio::test]
    async fn test_mock_recommendations() {
        let recs = MockBackend::new()
            .generate_recommendations(&request())
            .await
            .unwrap();

        assert_eq!(recs.len(), 3);
        assert!(recs[0].description.contains("$1000"));
        assert!(recs[2].description.contains("bonds"));
        assert!(recs[2].description.contains("Pay off car"));
        assert!(recs.windows(2).all(|w| w[0].priority <= w[1].priority));
    }

    #[tokio::test]
    async fn test_unhealthy_mock_fails() {
        let backend = MockBackend::unhealthy();
        assert!(!backend.health_check().await);
        assert!(backend.generate_recommendations(&request()).await.is_err());
    }
}

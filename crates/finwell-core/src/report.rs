//! Wellness report - every analysis over one snapshot in a single call

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregation, Aggregator, CategoryShare};
use crate::ai::RecommendationRequest;
use crate::config::AnalysisConfig;
use crate::format::format_currency;
use crate::insights::{Insight, InsightContext, InsightGenerator, SmartAlerts};
use crate::models::{normalize_batch, NormalizedBatch, UserFinancialProfile};
use crate::risk::{RiskAssessment, RiskClassifier};
use crate::snapshot::FinancialSnapshot;
use crate::summary::{goal_progress, net_worth, GoalProgress};

/// Dashboard bundle for one snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessReport {
    pub as_of: NaiveDate,
    pub transaction_count: usize,
    /// Records dropped during normalization
    pub skipped_records: usize,
    pub aggregation: Aggregation,
    pub top_categories: Vec<CategoryShare>,
    pub insights: Vec<Insight>,
    pub profile: Option<UserFinancialProfile>,
    pub risk: RiskAssessment,
    pub alerts: SmartAlerts,
    pub net_worth: f64,
    pub goals: Vec<GoalProgress>,
}

/// Transactions included in a recommendation prompt
const PROMPT_TRANSACTIONS: usize = 10;

/// Runs the aggregation, insight, and risk pipelines with one configuration
pub struct Analyzer {
    config: AnalysisConfig,
    aggregator: Aggregator,
    generator: InsightGenerator,
    classifier: RiskClassifier,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            aggregator: Aggregator::new(config.aggregation.clone()),
            generator: InsightGenerator::new(config.insights.clone()),
            classifier: RiskClassifier::new(config.risk.clone()),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Normalize the snapshot's transaction records
    pub fn normalize(&self, snapshot: &FinancialSnapshot) -> NormalizedBatch {
        normalize_batch(snapshot.transactions.clone())
    }

    pub fn insights(&self, batch: &NormalizedBatch, today: NaiveDate) -> Vec<Insight> {
        let aggregation = self.aggregator.aggregate(&batch.transactions, today);
        let ctx = InsightContext::new(&self.aggregator, &aggregation, &batch.transactions, today);
        self.generator.generate(&ctx)
    }

    /// Ranked categories using the configured top-N and "Others" label
    pub fn ranked_categories(
        &self,
        aggregation: &Aggregation,
        limit: Option<usize>,
    ) -> Vec<CategoryShare> {
        let cfg = &self.config.aggregation;
        aggregation
            .categories
            .ranked(limit.unwrap_or(cfg.top_categories).max(1), &cfg.others_label)
    }

    /// Resolve the profile (estimating missing figures) and classify it
    ///
    /// An empty batch is insufficient data even when a complete profile is
    /// present, so it always yields the Moderate default.
    pub fn risk(
        &self,
        snapshot: &FinancialSnapshot,
        batch: &NormalizedBatch,
    ) -> (Option<UserFinancialProfile>, RiskAssessment) {
        let profile = if batch.transactions.is_empty() {
            None
        } else {
            UserFinancialProfile::resolve(snapshot.profile.as_ref(), &batch.transactions)
        };
        let assessment = self.classifier.classify(profile.as_ref());
        (profile, assessment)
    }

    /// Financial data for the recommendation service
    ///
    /// Goals are the snapshot's goal names followed by `extra_goals`.
    pub fn recommendation_request(
        &self,
        snapshot: &FinancialSnapshot,
        extra_goals: &[String],
    ) -> RecommendationRequest {
        let batch = self.normalize(snapshot);
        let (profile, risk) = self.risk(snapshot, &batch);

        let mut recent: Vec<_> = batch.transactions.iter().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        let recent_transactions = recent
            .into_iter()
            .take(PROMPT_TRANSACTIONS)
            .map(|t| {
                format!(
                    "{} {} {} ({}, {})",
                    t.date,
                    t.display_description(),
                    format_currency(t.amount),
                    self.aggregator.category_of(t),
                    t.transaction_type
                )
            })
            .collect();

        let goals = snapshot
            .goals
            .iter()
            .map(|g| g.name.clone())
            .chain(extra_goals.iter().cloned())
            .collect();

        RecommendationRequest {
            monthly_income: snapshot
                .effective_monthly_income()
                .or(profile.as_ref().map(|p| p.monthly_income)),
            risk_tolerance: risk.level,
            goals,
            recent_transactions,
        }
    }

    pub fn analyze(&self, snapshot: &FinancialSnapshot, today: NaiveDate) -> WellnessReport {
        let batch = self.normalize(snapshot);
        let transactions = &batch.transactions;

        let aggregation = self.aggregator.aggregate(transactions, today);
        let ctx = InsightContext::new(&self.aggregator, &aggregation, transactions, today);
        let insights = self.generator.generate(&ctx);
        let top_categories = self.ranked_categories(&aggregation, None);

        let (profile, risk) = self.risk(snapshot, &batch);

        let monthly_income = snapshot
            .effective_monthly_income()
            .or(profile.as_ref().map(|p| p.monthly_income));
        let alerts = SmartAlerts::build(&aggregation, monthly_income, &self.config.alerts);

        let report = WellnessReport {
            as_of: today,
            transaction_count: transactions.len(),
            skipped_records: batch.skipped,
            top_categories,
            insights,
            profile,
            risk,
            alerts,
            net_worth: net_worth(&snapshot.accounts),
            goals: snapshot.goals.iter().map(goal_progress).collect(),
            aggregation,
        };

        tracing::debug!(
            transactions = report.transaction_count,
            skipped = report.skipped_records,
            insights = report.insights.len(),
            risk = report.risk.level.as_str(),
            "Wellness report complete"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, FinancialGoal, ProfileRecord, RawAmount, TransactionRecord};
    use crate::risk::RiskLevel;

    fn record(amount: f64, category: Option<&str>, tx_type: &str, date: &str) -> TransactionRecord {
        TransactionRecord {
            transaction_id: None,
            amount: RawAmount::Number(amount),
            category: category.map(str::to_string),
            transaction_type: tx_type.to_string(),
            transaction_date: date.to_string(),
            description: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
    }

    #[test]
    fn test_empty_snapshot_is_neutral() {
        let report = Analyzer::default().analyze(&FinancialSnapshot::default(), today());

        assert_eq!(report.transaction_count, 0);
        assert!(report.insights.is_empty());
        assert!(report.top_categories.is_empty());
        assert_eq!(report.risk.level, RiskLevel::Moderate);
        assert!(report.risk.insufficient_data);
        assert_eq!(report.net_worth, 0.0);
        assert!(report.alerts.upcoming_bills.is_empty());
    }

    #[test]
    fn test_empty_batch_with_complete_profile_is_moderate() {
        let snapshot = FinancialSnapshot {
            profile: Some(ProfileRecord {
                age: Some(50),
                occupation: Some("Artist".to_string()),
                monthly_income: Some(4000.0),
                monthly_expenses: Some(3000.0),
            }),
            ..Default::default()
        };

        let report = Analyzer::default().analyze(&snapshot, today());

        assert_eq!(report.transaction_count, 0);
        assert!(report.insights.is_empty());
        assert!(report.profile.is_none());
        assert_eq!(report.risk.level, RiskLevel::Moderate);
        assert!(report.risk.insufficient_data);
        assert_eq!(report.risk.allocation.total(), 100);
    }

    #[test]
    fn test_malformed_only_batch_with_profile_is_moderate() {
        let mut snapshot =
            FinancialSnapshot::from_transactions(vec![record(-5.0, None, "bogus", "2024-06-01")]);
        snapshot.profile = Some(ProfileRecord {
            age: Some(30),
            occupation: Some("Engineer".to_string()),
            monthly_income: Some(9000.0),
            monthly_expenses: Some(3000.0),
        });

        let analyzer = Analyzer::default();
        let batch = analyzer.normalize(&snapshot);
        let (profile, assessment) = analyzer.risk(&snapshot, &batch);

        assert_eq!(batch.skipped, 1);
        assert!(profile.is_none());
        assert_eq!(assessment.level, RiskLevel::Moderate);
        assert!(assessment.insufficient_data);
    }

    #[test]
    fn test_full_snapshot() {
        let snapshot = FinancialSnapshot {
            transactions: vec![
                record(-100.0, Some("Food"), "expense", "2024-06-05"),
                record(-50.0, Some("Food"), "expense", "2024-05-28"),
                record(6000.0, None, "income", "2024-06-01"),
                record(-1.0, None, "bogus", "2024-06-01"),
            ],
            profile: Some(ProfileRecord {
                age: Some(30),
                occupation: Some("Engineer".to_string()),
                monthly_income: Some(9000.0),
                monthly_expenses: Some(3000.0),
            }),
            accounts: vec![Account {
                name: "Checking".to_string(),
                account_type: None,
                balance: 1200.0,
            }],
            goals: vec![FinancialGoal {
                name: "Car".to_string(),
                current: 500.0,
                target: 2000.0,
            }],
            monthly_income: None,
        };

        let report = Analyzer::default().analyze(&snapshot, today());

        assert_eq!(report.transaction_count, 3);
        assert_eq!(report.skipped_records, 1);
        assert_eq!(report.aggregation.categories.get("Food"), Some(150.0));
        assert_eq!(report.aggregation.monthly.percent_change, Some(100.0));
        assert_eq!(report.insights.len(), 4);
        assert_eq!(report.risk.level, RiskLevel::High);
        assert_eq!(report.net_worth, 1200.0);
        assert_eq!(report.goals[0].percent, 25.0);
        // Bills priced from the profile income
        assert_eq!(report.alerts.upcoming_bills[0].amount, 2700.0);
        assert!(report.alerts.spending_alert.is_some());
    }

    #[test]
    fn test_recent_transactions_total_matches_monthly_total() {
        let snapshot = FinancialSnapshot::from_transactions(vec![
            record(-10.0, Some("Food"), "expense", "2024-06-01"),
            record(-15.0, None, "withdrawal", "2024-06-10"),
            record(-99.0, Some("Food"), "expense", "2024-04-01"),
        ]);
        let report = Analyzer::default().analyze(&snapshot, today());
        let recent = &report.insights[2];
        assert!(recent.description.contains("2 transactions"));
        assert!(recent.description.contains("$25.00"));
        assert_eq!(report.aggregation.monthly.current_month_total, 25.0);
    }

    #[test]
    fn test_recommendation_request() {
        let mut snapshot = FinancialSnapshot::from_transactions(vec![
            record(-42.1, Some("Food"), "expense", "2024-06-01"),
            record(-8.0, None, "withdrawal", "2024-06-03"),
        ]);
        snapshot.goals.push(FinancialGoal {
            name: "House".to_string(),
            current: 0.0,
            target: 50000.0,
        });
        snapshot.monthly_income = Some(5200.0);

        let request =
            Analyzer::default().recommendation_request(&snapshot, &["Retire".to_string()]);
        assert_eq!(request.monthly_income, Some(5200.0));
        assert_eq!(request.risk_tolerance, RiskLevel::Moderate);
        assert_eq!(request.goals, vec!["House".to_string(), "Retire".to_string()]);
        assert_eq!(
            request.recent_transactions,
            vec![
                "2024-06-03 Unknown -$8.00 (Uncategorized, withdrawal)".to_string(),
                "2024-06-01 Unknown -$42.10 (Food, expense)".to_string(),
            ]
        );
    }

    #[test]
    fn test_ranked_categories_limit() {
        let snapshot = FinancialSnapshot::from_transactions(vec![
            record(-10.0, Some("A"), "expense", "2024-06-01"),
            record(-20.0, Some("B"), "expense", "2024-06-01"),
            record(-30.0, Some("C"), "expense", "2024-06-01"),
        ]);
        let analyzer = Analyzer::default();
        let batch = analyzer.normalize(&snapshot);
        let aggregation = analyzer.aggregator().aggregate(&batch.transactions, today());

        let ranked = analyzer.ranked_categories(&aggregation, Some(1));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].category, "C");
        assert_eq!(ranked[1].category, "Others");
        assert_eq!(ranked[1].amount, 30.0);
    }
}

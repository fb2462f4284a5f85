//! Risk profile classification
//!
//! A fixed decision procedure over a user's age, occupation, income, and
//! expenses. Rules are evaluated in order and the first match wins:
//!
//! 1. **Low** - older, low income without a stable job, or high expense ratio
//! 2. **High** - young, high income, stable job, and low expense ratio
//! 3. **Moderate** - everything else, including missing data

use serde::{Deserialize, Serialize};

use crate::config::RiskConfig;
use crate::models::UserFinancialProfile;

const INSUFFICIENT_DATA_REASON: &str = "Insufficient data for analysis";

const HIGH_RISK_REASON: &str = "Given your young age, high income, stable job, and good savings \
     rate, you can afford to take more investment risks for potentially higher returns.";

const MODERATE_RISK_REASON: &str = "Based on your balanced age, income, and expense profile, a \
     moderate-risk investment approach offers a good balance of growth and stability.";

/// Coarse tolerance for investment volatility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn all() -> &'static [RiskLevel] {
        &[RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "moderate" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            _ => Err(format!("Unknown risk level: {}", s)),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percentage breakdown of a hypothetical portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationStrategy {
    pub stocks: u32,
    pub bonds: u32,
    pub mutual_funds: u32,
    pub crypto: u32,
    pub cash: u32,
}

impl AllocationStrategy {
    pub const fn new(stocks: u32, bonds: u32, mutual_funds: u32, crypto: u32, cash: u32) -> Self {
        Self {
            stocks,
            bonds,
            mutual_funds,
            crypto,
            cash,
        }
    }

    pub fn total(&self) -> u32 {
        self.entries().iter().map(|(_, pct)| pct).sum()
    }

    /// Asset classes with their display names, in display order
    pub fn entries(&self) -> [(&'static str, u32); 5] {
        [
            ("Stocks", self.stocks),
            ("Bonds", self.bonds),
            ("Mutual Funds", self.mutual_funds),
            ("Crypto", self.crypto),
            ("Cash", self.cash),
        ]
    }
}

/// Classifier output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub reason: String,
    pub allocation: AllocationStrategy,
    /// True when no profile was available and the default was returned
    pub insufficient_data: bool,
}

/// Assigns a risk level and allocation from a financial profile
#[derive(Debug, Clone, Default)]
pub struct RiskClassifier {
    config: RiskConfig,
}

impl RiskClassifier {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Whether the occupation contains one of the stable-job keywords (case-insensitive)
    pub fn has_stable_job(&self, occupation: &str) -> bool {
        let occupation = occupation.to_lowercase();
        self.config
            .stable_jobs
            .iter()
            .any(|job| occupation.contains(&job.to_lowercase()))
    }

    /// Classify a profile; `None` yields the Moderate default with an
    /// insufficient-data reason
    pub fn classify(&self, profile: Option<&UserFinancialProfile>) -> RiskAssessment {
        let Some(profile) = profile else {
            tracing::debug!("No profile available, using default risk level");
            return self.assessment(RiskLevel::Moderate, INSUFFICIENT_DATA_REASON.to_string(), true);
        };

        let cfg = &self.config;
        let stable = self.has_stable_job(&profile.occupation);
        let income = profile.monthly_income;
        let expenses = profile.monthly_expenses;

        let older = profile.age > cfg.low_risk_min_age;
        let low = older
            || (income < cfg.low_income_threshold && !stable)
            || expenses > cfg.high_expense_ratio * income;

        let (level, reason) = if low {
            let reason = format!(
                "Based on your {} and {} occupation, a low-risk approach is recommended to protect your wealth.",
                if older { "age" } else { "income-to-expense ratio" },
                if stable { "stable" } else { "variable" }
            );
            (RiskLevel::Low, reason)
        } else if profile.age < cfg.high_risk_max_age
            && income > cfg.high_income_threshold
            && stable
            && expenses < cfg.low_expense_ratio * income
        {
            (RiskLevel::High, HIGH_RISK_REASON.to_string())
        } else {
            (RiskLevel::Moderate, MODERATE_RISK_REASON.to_string())
        };

        tracing::debug!(
            age = profile.age,
            stable,
            level = level.as_str(),
            "Classified risk profile"
        );

        self.assessment(level, reason, false)
    }

    fn assessment(&self, level: RiskLevel, reason: String, insufficient_data: bool) -> RiskAssessment {
        RiskAssessment {
            level,
            reason,
            allocation: *self.config.allocations.for_level(level),
            insufficient_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(age: u32, occupation: &str, income: f64, expenses: f64) -> RiskAssessment {
        let profile = UserFinancialProfile::new(age, occupation, income, expenses);
        RiskClassifier::default().classify(Some(&profile))
    }

    #[test]
    fn test_older_artist_is_low_risk() {
        let result = classify(50, "Artist", 4000.0, 3000.0);
        assert_eq!(result.level, RiskLevel::Low);
        assert_eq!(
            result.reason,
            "Based on your age and variable occupation, a low-risk approach is recommended to protect your wealth."
        );
        assert_eq!(result.allocation, AllocationStrategy::new(20, 50, 20, 0, 10));
    }

    #[test]
    fn test_young_engineer_is_high_risk() {
        let result = classify(30, "Software Engineer", 9000.0, 3000.0);
        assert_eq!(result.level, RiskLevel::High);
        assert_eq!(result.reason, HIGH_RISK_REASON);
        assert_eq!(result.allocation, AllocationStrategy::new(60, 10, 15, 10, 5));
    }

    #[test]
    fn test_sales_rep_is_moderate() {
        let result = classify(40, "Sales Rep", 6000.0, 3500.0);
        assert_eq!(result.level, RiskLevel::Moderate);
        assert_eq!(result.reason, MODERATE_RISK_REASON);
        assert!(!result.insufficient_data);
    }

    #[test]
    fn test_age_boundary_is_strict() {
        // 45 does not fire the age rule; everything else is moderate
        assert_eq!(classify(45, "Teacher", 6000.0, 3000.0).level, RiskLevel::Moderate);
        assert_eq!(classify(46, "Teacher", 6000.0, 3000.0).level, RiskLevel::Low);
    }

    #[test]
    fn test_low_income_rule_requires_unstable_job() {
        let unstable = classify(40, "Freelancer", 4000.0, 1000.0);
        assert_eq!(unstable.level, RiskLevel::Low);
        assert!(unstable.reason.contains("income-to-expense ratio and variable"));

        assert_eq!(classify(40, "Doctor", 4000.0, 1000.0).level, RiskLevel::Moderate);
    }

    #[test]
    fn test_high_expense_ratio_overrides_high_branch() {
        let result = classify(30, "Engineer", 10000.0, 7500.0);
        assert_eq!(result.level, RiskLevel::Low);
        assert!(result.reason.contains("stable occupation"));
    }

    #[test]
    fn test_stable_job_match_is_case_insensitive_substring() {
        let classifier = RiskClassifier::default();
        assert!(classifier.has_stable_job("Senior PRODUCT MANAGER"));
        assert!(classifier.has_stable_job("professor of economics"));
        assert!(!classifier.has_stable_job("Artist"));
        assert!(!classifier.has_stable_job(""));
    }

    #[test]
    fn test_missing_profile_defaults_to_moderate() {
        let result = RiskClassifier::default().classify(None);
        assert_eq!(result.level, RiskLevel::Moderate);
        assert_eq!(result.reason, "Insufficient data for analysis");
        assert!(result.insufficient_data);
        assert_eq!(result.allocation.total(), 100);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let profile = UserFinancialProfile::new(33, "Manager", 8500.0, 2000.0);
        let classifier = RiskClassifier::default();
        let first = classifier.classify(Some(&profile));
        let second = classifier.classify(Some(&profile));
        assert_eq!(first.level, second.level);
        assert_eq!(first.allocation, second.allocation);
    }

    #[test]
    fn test_allocations_sum_to_100() {
        let classifier = RiskClassifier::default();
        for level in RiskLevel::all() {
            assert_eq!(classifier.config.allocations.for_level(*level).total(), 100);
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let config = RiskConfig {
            low_risk_min_age: 60,
            stable_jobs: vec!["artist".to_string()],
            ..Default::default()
        };
        let profile = UserFinancialProfile::new(50, "Artist", 6000.0, 3000.0);
        let result = RiskClassifier::new(config).classify(Some(&profile));
        assert_eq!(result.level, RiskLevel::Moderate);
    }

    #[test]
    fn test_risk_level_parsing() {
        assert_eq!("high".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!(RiskLevel::Moderate.to_string(), "Moderate");
        assert!("extreme".parse::<RiskLevel>().is_err());
    }
}

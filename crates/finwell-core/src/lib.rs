//! Finwell Core Library
//!
//! Financial-insight logic for the Finwell wellness dashboard:
//! - Transaction aggregation (category and month-over-month totals)
//! - Insight generation (a fixed catalogue of four insights plus smart alerts)
//! - Rule-based risk profile classification with asset allocations
//! - Net worth and goal progress summaries
//! - Pluggable AI backend for personalized recommendations
//! - TOML analysis configuration with embedded defaults
//!
//! Every analysis is a pure function of its input and an explicit "today".

pub mod aggregate;
pub mod ai;
pub mod config;
pub mod error;
pub mod format;
pub mod insights;
pub mod models;
pub mod report;
pub mod risk;
pub mod snapshot;
pub mod summary;

/// Test utilities including a mock chat-completions server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{Aggregation, Aggregator, CategoryShare, CategoryTotals, MonthlyTotals};
pub use ai::{
    AIBackend, AIClient, MockBackend, OpenAICompatibleBackend, Recommendation,
    RecommendationRequest, RecommendationType,
};
pub use config::{
    AggregationConfig, AlertsConfig, AnalysisConfig, BillTemplate, ExpensePredicate,
    InsightConfig, RiskConfig,
};
pub use error::{Error, Result};
pub use format::{format_currency, format_percent};
pub use insights::{Insight, InsightGenerator, InsightKind, SmartAlerts};
pub use models::{
    normalize_batch, Account, FinancialGoal, NormalizedBatch, ProfileRecord, Transaction,
    TransactionRecord, TransactionType, UserFinancialProfile, YearMonth,
};
pub use report::{Analyzer, WellnessReport};
pub use risk::{AllocationStrategy, RiskAssessment, RiskClassifier, RiskLevel};
pub use snapshot::{parse_transactions_csv, FinancialSnapshot};
pub use summary::{goal_progress, net_worth, GoalProgress};

//! Insight Generator
//!
//! Turns an aggregated transaction batch into a fixed catalogue of four
//! human-readable insights, plus the dashboard smart alerts.
//!
//! ## Architecture
//!
//! - `InsightBuilder` trait: each insight kind implements this
//! - `InsightGenerator`: runs the registered builders in display order
//! - `SmartAlerts`: spending alert, upcoming bills, and savings opportunity

mod budget_recommendation;
mod category_breakdown;
mod engine;
mod recent_activity;
mod smart_alerts;
mod spending_patterns;
mod types;

pub use budget_recommendation::BudgetRecommendationInsight;
pub use category_breakdown::CategoryBreakdownInsight;
pub use engine::{InsightBuilder, InsightContext, InsightGenerator};
pub use recent_activity::RecentActivityInsight;
pub use smart_alerts::{SavingsOpportunity, SmartAlerts, SpendingAlert, UpcomingBill};
pub use spending_patterns::SpendingPatternsInsight;
pub use types::{Insight, InsightKind};

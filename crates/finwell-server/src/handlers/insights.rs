//! Insight, category, and alert handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AnalysisQuery;
use crate::{AppError, AppState};
use finwell_core::{CategoryShare, FinancialSnapshot, Insight, MonthlyTotals, SmartAlerts};

/// POST /api/insights - The four spending insights for a snapshot
///
/// Returns an empty list when the snapshot has no valid transactions.
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalysisQuery>,
    Json(snapshot): Json<FinancialSnapshot>,
) -> Result<Json<Vec<Insight>>, AppError> {
    let today = state.today(params.as_of.as_deref())?;
    let batch = state.analyzer.normalize(&snapshot);
    let insights = state.analyzer.insights(&batch, today);

    debug!(
        transactions = batch.transactions.len(),
        skipped = batch.skipped,
        insights = insights.len(),
        "Generated insights"
    );

    Ok(Json(insights))
}

/// Query parameters for the category breakdown
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub as_of: Option<String>,
    /// Categories before the rest fold into "Others" (defaults to the configured value)
    pub top: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct CategoryBreakdown {
    pub categories: Vec<CategoryShare>,
    pub monthly: MonthlyTotals,
    pub total: f64,
}

/// POST /api/categories - Ranked category totals and month-over-month totals
pub async fn category_breakdown(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryQuery>,
    Json(snapshot): Json<FinancialSnapshot>,
) -> Result<Json<CategoryBreakdown>, AppError> {
    if params.top == Some(0) {
        return Err(AppError::bad_request("top must be at least 1"));
    }

    let today = state.today(params.as_of.as_deref())?;
    let batch = state.analyzer.normalize(&snapshot);
    let aggregation = state
        .analyzer
        .aggregator()
        .aggregate(&batch.transactions, today);

    Ok(Json(CategoryBreakdown {
        categories: state.analyzer.ranked_categories(&aggregation, params.top),
        total: aggregation.categories.total(),
        monthly: aggregation.monthly,
    }))
}

/// POST /api/alerts - Spending alert, upcoming bills, and savings opportunity
pub async fn smart_alerts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalysisQuery>,
    Json(snapshot): Json<FinancialSnapshot>,
) -> Result<Json<SmartAlerts>, AppError> {
    let today = state.today(params.as_of.as_deref())?;
    Ok(Json(state.analyzer.analyze(&snapshot, today).alerts))
}

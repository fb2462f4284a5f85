//! Wellness report handler

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use super::AnalysisQuery;
use crate::{AppError, AppState};
use finwell_core::{FinancialSnapshot, WellnessReport};

/// POST /api/report - Full dashboard report for a snapshot
pub async fn wellness_report(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalysisQuery>,
    Json(snapshot): Json<FinancialSnapshot>,
) -> Result<Json<WellnessReport>, AppError> {
    let today = state.today(params.as_of.as_deref())?;
    Ok(Json(state.analyzer.analyze(&snapshot, today)))
}

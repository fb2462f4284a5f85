//! Risk profile handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};
use finwell_core::{FinancialSnapshot, RiskAssessment, UserFinancialProfile};

#[derive(Debug, Serialize)]
pub struct RiskProfileResponse {
    /// Profile used for classification, with missing figures estimated from transactions
    pub profile: Option<UserFinancialProfile>,
    pub assessment: RiskAssessment,
}

/// POST /api/risk-profile - Classify risk tolerance and suggest an allocation
///
/// A snapshot without a usable profile yields the default moderate assessment.
pub async fn risk_profile(
    State(state): State<Arc<AppState>>,
    Json(snapshot): Json<FinancialSnapshot>,
) -> Result<Json<RiskProfileResponse>, AppError> {
    let batch = state.analyzer.normalize(&snapshot);
    let (profile, assessment) = state.analyzer.risk(&snapshot, &batch);

    tracing::debug!(
        level = assessment.level.as_str(),
        insufficient_data = assessment.insufficient_data,
        "Classified risk profile"
    );

    Ok(Json(RiskProfileResponse {
        profile,
        assessment,
    }))
}

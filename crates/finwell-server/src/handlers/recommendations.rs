//! AI recommendation handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::{AppError, AppState};
use finwell_core::{AIBackend, FinancialSnapshot, Recommendation};

/// Request body: a snapshot plus goals not recorded in it
#[derive(Debug, Deserialize)]
pub struct RecommendationBody {
    #[serde(flatten)]
    pub snapshot: FinancialSnapshot,
    #[serde(default)]
    pub extra_goals: Vec<String>,
}

/// POST /api/recommendations - Personalized recommendations from the AI backend
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RecommendationBody>,
) -> Result<Json<Vec<Recommendation>>, AppError> {
    let client = state
        .ai
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable("AI backend not configured"))?;

    let request = state
        .analyzer
        .recommendation_request(&body.snapshot, &body.extra_goals);

    let recommendations = client
        .generate_recommendations(&request)
        .await
        .map_err(|e| AppError::bad_gateway("Failed to generate recommendations", e))?;

    info!(
        count = recommendations.len(),
        model = client.model(),
        "Generated recommendations"
    );

    Ok(Json(recommendations))
}

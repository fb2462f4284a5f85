//! Health and configuration handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};
use finwell_core::{AIBackend, AnalysisConfig};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub ai_configured: bool,
}

/// GET /api/health - Liveness check (does not contact the AI backend)
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        ai_configured: state.ai.is_some(),
    })
}

#[derive(Debug, Serialize)]
pub struct AIHealthResponse {
    pub healthy: bool,
    pub host: String,
    pub model: String,
}

/// GET /api/ai/health - Check AI backend availability
pub async fn ai_health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AIHealthResponse>, AppError> {
    let client = state
        .ai
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable("AI backend not configured"))?;

    Ok(Json(AIHealthResponse {
        healthy: client.health_check().await,
        host: client.host().to_string(),
        model: client.model().to_string(),
    }))
}

/// GET /api/config - Effective analysis configuration
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<AnalysisConfig> {
    Json(state.analyzer.config().clone())
}

/// Fallback for unknown API routes
pub async fn not_found() -> AppError {
    AppError::not_found("Not found")
}

//! Monitoring dashboard alert feed.

use axum::{extract::State, Json};

use crate::state::SharedState;
use acms_common::ApiError;
use acms_engine::{Alert, AlertStats};

/// GET /api/alerts: newest first
pub async fn api_alerts(State(state): State<SharedState>) -> Json<Vec<Alert>> {
    Json(state.monitoring.alerts())
}

/// GET /api/alerts/stats: figures for the dashboard stats card
pub async fn api_alert_stats(State(state): State<SharedState>) -> Json<AlertStats> {
    Json(state.monitoring.stats())
}

/// POST /api/alerts/refresh: runs one simulated scan; 409 while one is running
pub async fn api_refresh_alerts(
    State(state): State<SharedState>,
) -> Result<Json<Alert>, ApiError> {
    let alert = state.monitoring.refresh().await?;
    Ok(Json(alert))
}

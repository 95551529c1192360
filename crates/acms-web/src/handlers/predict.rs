//! Delayed risk prediction.

use axum::{extract::State, Json};

use crate::state::SharedState;
use acms_common::ApiError;
use acms_engine::PredictionReport;

/// POST /api/predict: resolves after the simulated processing delay.
/// 503 once the demo view is closed, 409 while another prediction is pending.
pub async fn api_predict(
    State(state): State<SharedState>,
) -> Result<Json<PredictionReport>, ApiError> {
    let report = state.demo.run_prediction().await?;
    Ok(Json(report))
}

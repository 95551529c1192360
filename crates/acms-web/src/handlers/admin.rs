//! Endpoints polled by the admin dashboard.

use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::state::SharedState;

/// The admin page's "current prediction" card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentPrediction {
    pub disaster: String,
    pub probability: f64,
    /// RFC 3339, UTC
    pub time: String,
}

impl CurrentPrediction {
    /// Shown until the demo has produced a prediction.
    pub fn sample() -> Self {
        Self {
            disaster: "wildfire".to_string(),
            probability: 0.85,
            time: "2025-08-12T08:53:00Z".to_string(),
        }
    }
}

/// GET /api/predictions
pub async fn api_predictions(State(state): State<SharedState>) -> Json<CurrentPrediction> {
    let current = match state.demo.latest_prediction() {
        Some((report, at)) => CurrentPrediction {
            disaster: format!("{} weather risk", report.tier.label().to_lowercase()),
            probability: report.result.risk_probability,
            time: at.to_rfc3339_opts(SecondsFormat::Secs, true),
        },
        None => CurrentPrediction::sample(),
    };
    Json(current)
}

/// GET /api/health: drives the admin page's connected badge
pub async fn api_health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "viewOpen": state.view_open(),
        "alertScanRunning": state.monitoring.is_processing(),
        "time": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    }))
}

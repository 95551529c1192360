//! Parameter form endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::state::SharedState;
use acms_common::{ApiError, ParameterField, WeatherParameterSet};

/// Body of `POST /api/parameters`. `value` may be a number or raw form text.
#[derive(Debug, Deserialize)]
pub struct ParameterUpdate {
    pub field: String,
    #[serde(default)]
    pub value: Value,
}

/// GET /api/parameters
pub async fn api_parameters(State(state): State<SharedState>) -> Json<WeatherParameterSet> {
    Json(state.demo.parameters())
}

/// POST /api/parameters: update one field; bad values are coerced, never rejected
pub async fn api_update_parameter(
    State(state): State<SharedState>,
    Json(update): Json<ParameterUpdate>,
) -> Result<Json<WeatherParameterSet>, ApiError> {
    let field = ParameterField::from_key(&update.field)
        .ok_or_else(|| ApiError::BadRequest(format!("unknown parameter '{}'", update.field)))?;

    let raw = match &update.value {
        Value::String(text) => text.clone(),
        Value::Number(n)    => n.to_string(),
        _                   => String::new(),
    };
    Ok(Json(state.demo.update_parameter(field, &raw)))
}

/// POST /api/parameters/randomize
pub async fn api_randomize_parameters(State(state): State<SharedState>) -> Json<WeatherParameterSet> {
    Json(state.demo.randomize_parameters())
}

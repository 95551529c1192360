//! The disaster prediction demo page.

use axum::{extract::State, response::Html};
use minijinja::{context, Environment};
use serde::Serialize;

use crate::state::SharedState;
use acms_agent::DisplayState;
use acms_common::{ApiError, ParameterField};

const DEMO_TEMPLATE: &str = include_str!("../../templates/demo.html");

/// One row of the parameter form.
#[derive(Debug, Serialize)]
struct FieldView {
    key: &'static str,
    label: &'static str,
    unit: &'static str,
    min: f64,
    max: f64,
    step: f64,
    value: f64,
}

/// GET /: server-rendered page; live updates arrive over /api/events
pub async fn demo_page(State(state): State<SharedState>) -> Result<Html<String>, ApiError> {
    let parameters = state.demo.parameters();
    let fields: Vec<FieldView> = ParameterField::ALL
        .into_iter()
        .map(|field| {
            let range = field.range();
            FieldView {
                key: field.key(),
                label: field.label(),
                unit: field.unit(),
                min: range.min,
                max: range.max,
                step: range.step,
                value: parameters.get(field),
            }
        })
        .collect();

    let display = state.demo.display_state();
    let processing = matches!(display, DisplayState::Processing);
    let report = match display {
        DisplayState::Ready(report) => Some(report),
        _ => None,
    };

    let mut env = Environment::new();
    env.add_template("demo.html", DEMO_TEMPLATE)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let html = env
        .get_template("demo.html")
        .and_then(|tmpl| {
            tmpl.render(context! {
                fields,
                processing,
                report,
                view_open => state.view_open(),
                alerts => state.monitoring.alerts(),
                stats => state.monitoring.stats(),
            })
        })
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Html(html))
}

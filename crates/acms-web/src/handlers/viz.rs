//! Latest frame of each visualisation panel as an SVG document.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::state::SharedState;
use acms_agent::Panel;

fn svg(body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
}

/// GET /api/viz/network.svg
pub async fn network_svg(State(state): State<SharedState>) -> impl IntoResponse {
    svg(state.demo.panel_svg(Panel::Network))
}

/// GET /api/viz/chart.svg
pub async fn chart_svg(State(state): State<SharedState>) -> impl IntoResponse {
    svg(state.demo.panel_svg(Panel::Chart))
}

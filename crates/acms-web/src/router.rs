//! Axum router: maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use crate::state::SharedState;
use crate::handlers::{
    demo::demo_page,
    parameters::{api_parameters, api_update_parameter, api_randomize_parameters},
    predict::api_predict,
    viz::{network_svg, chart_svg},
    alerts::{api_alerts, api_alert_stats, api_refresh_alerts},
    admin::{api_predictions, api_health},
};
use crate::sse::sse_handler;

/// Build and return the full Axum router.
pub fn build_router(state: SharedState) -> Router {
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        // Pages
        .route("/",                         get(demo_page))

        // SSE streaming
        .route("/api/events",               get(sse_handler))

        // Demo API
        .route("/api/parameters",           get(api_parameters).post(api_update_parameter))
        .route("/api/parameters/randomize", post(api_randomize_parameters))
        .route("/api/predict",              post(api_predict))
        .route("/api/viz/network.svg",      get(network_svg))
        .route("/api/viz/chart.svg",        get(chart_svg))

        // Monitoring
        .route("/api/alerts",               get(api_alerts))
        .route("/api/alerts/stats",         get(api_alert_stats))
        .route("/api/alerts/refresh",       post(api_refresh_alerts))

        // Admin
        .route("/api/predictions",          get(api_predictions))
        .route("/api/health",               get(api_health))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

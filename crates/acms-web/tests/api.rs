//! In-process tests of the HTTP surface.

use std::sync::Arc;
use std::time::Duration;

use acms_agent::Config;
use acms_web::{handlers::admin::CurrentPrediction, router::build_router, state::AppState};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_state() -> Arc<AppState> {
    acms_test_utils::init_tracing();
    let mut config = Config::default();
    config.demo.seed = Some(42);
    Arc::new(AppState::new(config))
}

fn open_app() -> (Arc<AppState>, Router) {
    let state = test_state();
    state.open_view();
    let app = build_router(state.clone());
    (state, app)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = send(app, Request::get(uri).body(Body::empty()).unwrap()).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn post(uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::post(uri);
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn post_json(app: &Router, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, post(uri, body)).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test(start_paused = true)]
async fn test_default_parameters() {
    let (_state, app) = open_app();
    let (status, body) = get_json(&app, "/api/parameters").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "temperature": 25.0, "humidity": 60.0, "pressure": 1013.0, "windSpeed": 10.0,
            "windDirection": 180.0, "precipitation": 0.0, "visibility": 10.0, "cloudCover": 30.0
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_parameter_input_is_coerced() {
    let (_state, app) = open_app();

    let (status, body) =
        post_json(&app, "/api/parameters", Some(json!({ "field": "pressure", "value": "abc" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pressure"], 950.0);

    let (_, body) =
        post_json(&app, "/api/parameters", Some(json!({ "field": "humidity", "value": 150 }))).await;
    assert_eq!(body["humidity"], 100.0);

    let (_, body) =
        post_json(&app, "/api/parameters", Some(json!({ "field": "temperature", "value": "-12.5" }))).await;
    assert_eq!(body["temperature"], -12.5);
    // Earlier updates persist.
    assert_eq!(body["pressure"], 950.0);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_parameter_is_bad_request() {
    let (_state, app) = open_app();
    let (status, body) =
        post_json(&app, "/api/parameters", Some(json!({ "field": "dewPoint", "value": 3 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("dewPoint"));
}

#[tokio::test(start_paused = true)]
async fn test_randomize_stays_in_range() {
    let (_state, app) = open_app();
    let (status, body) = post_json(&app, "/api/parameters/randomize", None).await;
    assert_eq!(status, StatusCode::OK);
    let humidity = body["humidity"].as_f64().unwrap();
    assert!((0.0..=100.0).contains(&humidity));
    let pressure = body["pressure"].as_f64().unwrap();
    assert!((950.0..=1050.0).contains(&pressure));

    let (_, current) = get_json(&app, "/api/parameters").await;
    assert_eq!(current, body);
}

#[tokio::test(start_paused = true)]
async fn test_predict_returns_report_and_updates_admin_poll() {
    let (_state, app) = open_app();

    let (_, before) = get_json(&app, "/api/predictions").await;
    let sample: CurrentPrediction = serde_json::from_value(before).unwrap();
    assert_eq!(sample, CurrentPrediction::sample());

    let started = tokio::time::Instant::now();
    let (status, report) = post_json(&app, "/api/predict", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(started.elapsed() >= Duration::from_millis(2000));

    let tier = report["tier"].as_str().unwrap();
    assert!(["LOW", "MEDIUM", "HIGH"].contains(&tier));
    let confidence = report["confidenceDisplay"].as_u64().unwrap();
    assert!((60..=95).contains(&confidence));

    let (_, current) = get_json(&app, "/api/predictions").await;
    assert_eq!(current["probability"], report["result"]["riskProbability"]);
    assert!(current["disaster"].as_str().unwrap().ends_with("weather risk"));
}

#[tokio::test(start_paused = true)]
async fn test_predict_after_view_closed_is_unavailable() {
    let (state, app) = open_app();
    state.close_view();
    let (status, body) = post_json(&app, "/api/predict", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].is_string());
}

#[tokio::test(start_paused = true)]
async fn test_visualisation_snapshots() {
    let (_state, app) = open_app();

    let response = app
        .clone()
        .oneshot(Request::get("/api/viz/network.svg").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let svg = String::from_utf8(body.to_vec()).unwrap();
    assert_eq!(svg.matches("<line").count(), 228);
    assert!(svg.contains("LSTM 1"));

    let (status, body) =
        send(&app, Request::get("/api/viz/chart.svg").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let svg = String::from_utf8(body).unwrap();
    assert_eq!(svg.matches("<polyline").count(), 1);
    assert!(svg.contains("Time Series Weather Data"));
}

#[tokio::test(start_paused = true)]
async fn test_alert_refresh_and_busy_rejection() {
    let (_state, app) = open_app();

    let (_, alerts) = get_json(&app, "/api/alerts").await;
    assert_eq!(alerts.as_array().unwrap().len(), 3);
    assert_eq!(alerts[0]["location"], "California, USA");

    let first = tokio::spawn({
        let app = app.clone();
        async move { app.oneshot(post("/api/alerts/refresh", None)).await.unwrap().status() }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let (status, body) = post_json(&app, "/api/alerts/refresh", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("in progress"));

    assert_eq!(first.await.unwrap(), StatusCode::OK);
    let (_, stats) = get_json(&app, "/api/alerts/stats").await;
    assert_eq!(stats["totalAlerts"], 248);
    assert_eq!(stats["areasMonitored"], 1847);
    let (_, alerts) = get_json(&app, "/api/alerts").await;
    assert_eq!(alerts.as_array().unwrap().len(), 4);
    assert_eq!(alerts[0]["location"], "New Detection Zone");
}

#[tokio::test(start_paused = true)]
async fn test_demo_page_renders_form() {
    let (_state, app) = open_app();
    let (status, body) = send(&app, Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains(r#"name="windSpeed""#));
    assert!(html.contains("California, USA"));
    assert!(html.contains("<strong>247</strong>"));
    assert!(!html.contains("Demo view closed"));
}

#[tokio::test(start_paused = true)]
async fn test_health_reports_view_state() {
    let (state, app) = open_app();
    let (_, body) = get_json(&app, "/api/health").await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["viewOpen"], true);

    state.close_view();
    let (_, body) = get_json(&app, "/api/health").await;
    assert_eq!(body["viewOpen"], false);
}

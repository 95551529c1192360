//! acms-web — HTTP front end for the ACMS risk demo.
//! Provides:
//!   - The demo page (parameter form, result card, live visualisations)
//!   - JSON endpoints for parameters, predictions and alerts
//!   - SVG snapshots of both visualisation panels
//!   - An SSE stream of demo and monitoring events

pub mod router;
pub mod handlers;
pub mod state;
pub mod sse;

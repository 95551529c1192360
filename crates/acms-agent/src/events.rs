//! Events pushed to subscribers (the SSE stream, tests) as the demo and the
//! monitoring agent make progress.

use acms_common::WeatherParameterSet;
use acms_engine::{Alert, PredictionReport};
use serde::Serialize;

/// Capacity of the shared event bus. Slow subscribers lag rather than block.
pub const EVENT_BUS_CAPACITY: usize = 256;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// The processing state is now visible
    PredictionStarted,
    /// The delayed prediction finished and replaced the processing state
    PredictionReady { report: PredictionReport },
    /// The whole parameter set was replaced
    ParametersChanged { parameters: WeatherParameterSet },
    NetworkRedrawn,
    ChartRedrawn,
    /// The demo view was torn down; no more redraws follow
    ViewClosed,
    AlertScanStarted,
    AlertDetected { alert: Alert },
}

impl AgentEvent {
    /// The snake_case `type` tag, used as the SSE event name.
    pub fn kind(&self) -> &'static str {
        match self {
            AgentEvent::PredictionStarted        => "prediction_started",
            AgentEvent::PredictionReady { .. }   => "prediction_ready",
            AgentEvent::ParametersChanged { .. } => "parameters_changed",
            AgentEvent::NetworkRedrawn           => "network_redrawn",
            AgentEvent::ChartRedrawn             => "chart_redrawn",
            AgentEvent::ViewClosed               => "view_closed",
            AgentEvent::AlertScanStarted         => "alert_scan_started",
            AgentEvent::AlertDetected { .. }     => "alert_detected",
        }
    }
}

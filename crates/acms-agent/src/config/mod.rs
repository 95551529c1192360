//! Configuration loading for ACMS.
//! Reads acms.toml from the current directory or the path in the ACMS_CONFIG env var.

use acms_common::{AcmsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::orchestrator::RedrawSchedule;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

fn default_host()       -> String { "127.0.0.1".to_string() }
fn default_port()       -> u16    { 3001 }
fn default_static_dir() -> String { "static".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host:       default_host(),
            port:       default_port(),
            static_dir: default_static_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_prediction_delay_ms")]
    pub prediction_delay_ms: u64,
    #[serde(default = "default_network_redraw_ms")]
    pub network_redraw_ms: u64,
    #[serde(default = "default_chart_redraw_ms")]
    pub chart_redraw_ms: u64,
    #[serde(default = "default_network_width")]
    pub network_width: f64,
    #[serde(default = "default_network_height")]
    pub network_height: f64,
    #[serde(default = "default_chart_width")]
    pub chart_width: f64,
    #[serde(default = "default_chart_height")]
    pub chart_height: f64,
    /// Fixes the engine weights and every random draw when set.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_prediction_delay_ms() -> u64 { 2000 }
fn default_network_redraw_ms()   -> u64 { 3000 }
fn default_chart_redraw_ms()     -> u64 { 5000 }
fn default_network_width()       -> f64 { 800.0 }
fn default_network_height()      -> f64 { 400.0 }
fn default_chart_width()         -> f64 { 800.0 }
fn default_chart_height()        -> f64 { 300.0 }

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            prediction_delay_ms: default_prediction_delay_ms(),
            network_redraw_ms:   default_network_redraw_ms(),
            chart_redraw_ms:     default_chart_redraw_ms(),
            network_width:       default_network_width(),
            network_height:      default_network_height(),
            chart_width:         default_chart_width(),
            chart_height:        default_chart_height(),
            seed:                None,
        }
    }
}

impl DemoConfig {
    pub fn prediction_delay(&self) -> Duration {
        Duration::from_millis(self.prediction_delay_ms)
    }

    pub fn schedule(&self) -> RedrawSchedule {
        RedrawSchedule {
            network: Duration::from_millis(self.network_redraw_ms),
            chart:   Duration::from_millis(self.chart_redraw_ms),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default = "default_scan_delay_ms")]
    pub scan_delay_ms: u64,
    #[serde(default = "default_max_alerts")]
    pub max_alerts: usize,
}

fn default_scan_delay_ms() -> u64   { 3000 }
fn default_max_alerts()    -> usize { 10 }

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            scan_delay_ms: default_scan_delay_ms(),
            max_alerts:    default_max_alerts(),
        }
    }
}

impl MonitoringConfig {
    pub fn scan_delay(&self) -> Duration {
        Duration::from_millis(self.scan_delay_ms)
    }
}


impl Config {
    /// Load configuration from acms.toml.
    /// Checks the ACMS_CONFIG env var first, then the current directory.
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        let path = std::env::var("ACMS_CONFIG")
            .unwrap_or_else(|_| "acms.toml".to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!(
                "Config file not found: {}; using defaults. Copy acms.example.toml to acms.toml to customise.",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AcmsError::Config(msg) => AcmsError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AcmsError::Config(e.to_string()))
    }
}

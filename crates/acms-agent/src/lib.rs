//! acms-agent — The disaster prediction demo and the monitoring agent.
//!
//! Wires user-edited or randomized weather parameters through the risk
//! engine, keeps the two demo visualisations redrawing on their schedules,
//! and simulates satellite alert scans. Everything here is bound to the
//! lifetime of a [`DemoView`]; tearing the view down cancels every pending
//! redraw and delayed prediction.

pub mod config;
pub mod events;
pub mod orchestrator;
pub mod monitoring;

pub use config::Config;
pub use events::AgentEvent;
pub use orchestrator::{DemoOrchestrator, DemoView, DisplayState, Panel, RedrawSchedule};
pub use monitoring::MonitoringAgent;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a std mutex, recovering the data if a previous holder panicked.
/// Guards from this are never held across an `.await`.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

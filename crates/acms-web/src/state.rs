//! Shared application state for the web server.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use acms_agent::events::EVENT_BUS_CAPACITY;
use acms_agent::{AgentEvent, Config, DemoOrchestrator, DemoView, MonitoringAgent};
use tokio::sync::broadcast;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: Config,
    pub demo: Arc<DemoOrchestrator>,
    pub monitoring: Arc<MonitoringAgent>,
    /// Broadcast channel for SSE push events
    pub event_tx: broadcast::Sender<AgentEvent>,
    view: Mutex<Option<DemoView>>,
}

impl AppState {
    /// Build the agents. The demo view starts closed; see [`AppState::open_view`].
    pub fn new(config: Config) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_BUS_CAPACITY);
        let demo = Arc::new(DemoOrchestrator::new(&config.demo, event_tx.clone()));
        let monitoring = Arc::new(MonitoringAgent::new(
            &config.monitoring,
            config.demo.seed,
            event_tx.clone(),
        ));
        Self { config, demo, monitoring, event_tx, view: Mutex::new(None) }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AgentEvent> {
        self.event_tx.subscribe()
    }

    fn view(&self) -> MutexGuard<'_, Option<DemoView>> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open the demo view if it is not already open.
    /// Must be called from within a Tokio runtime.
    pub fn open_view(&self) {
        let mut view = self.view();
        if view.is_none() {
            *view = Some(DemoView::open(self.demo.clone(), self.config.demo.schedule()));
        }
    }

    /// Tear the demo view down, cancelling its timers and any pending prediction.
    pub fn close_view(&self) {
        // Teardown runs in DemoView's Drop.
        let closed = self.view().take();
        drop(closed);
    }

    pub fn view_open(&self) -> bool {
        self.view().is_some()
    }
}

pub type SharedState = Arc<AppState>;

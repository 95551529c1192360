//! Simulated satellite monitoring: a capped alert feed refreshed by
//! on-demand scans.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use acms_common::{AcmsError, Result};
use acms_engine::{Alert, AlertFeed, AlertStats};
use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::config::MonitoringConfig;
use crate::events::AgentEvent;
use crate::lock;

pub struct MonitoringAgent {
    feed: Mutex<AlertFeed>,
    rng: Mutex<StdRng>,
    processing: AtomicBool,
    scan_delay: Duration,
    events: broadcast::Sender<AgentEvent>,
}

/// Clears the processing flag however the scan ends, including when the
/// refresh future is dropped mid-delay.
struct ScanGuard<'a>(&'a AtomicBool);

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl MonitoringAgent {
    pub fn new(
        config: &MonitoringConfig,
        seed: Option<u64>,
        events: broadcast::Sender<AgentEvent>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            feed: Mutex::new(AlertFeed::seeded(config.max_alerts)),
            rng: Mutex::new(rng),
            processing: AtomicBool::new(false),
            scan_delay: config.scan_delay(),
            events,
        }
    }

    /// Newest first.
    pub fn alerts(&self) -> Vec<Alert> {
        lock(&self.feed).to_vec()
    }

    pub fn stats(&self) -> AlertStats {
        lock(&self.feed).stats()
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::Acquire)
    }

    /// Run one simulated scan and prepend the detection it produces.
    /// A refresh requested while another is running is rejected with
    /// [`AcmsError::Busy`].
    pub async fn refresh(&self) -> Result<Alert> {
        if self
            .processing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("alert refresh refused: scan already running");
            return Err(AcmsError::Busy("alert scan already in progress".to_string()));
        }
        let _guard = ScanGuard(&self.processing);
        let _ = self.events.send(AgentEvent::AlertScanStarted);

        tokio::time::sleep(self.scan_delay).await;

        let alert = {
            let mut rng = lock(&self.rng);
            lock(&self.feed).detect(&mut *rng)
        };
        info!(
            id = alert.id,
            kind = ?alert.kind,
            severity = ?alert.severity,
            confidence = alert.confidence,
            "new detection"
        );
        let _ = self.events.send(AgentEvent::AlertDetected { alert: alert.clone() });
        Ok(alert)
    }
}

//! The prediction demo: parameters in, delayed risk report out, and two
//! visualisations redrawn on independent schedules.
//!
//! All scheduled work is bound to a [`DemoView`]. Opening the view draws both
//! panels and starts the redraw timers; tearing it down stops them and
//! cancels a prediction that is still inside its simulated delay.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use acms_common::{AcmsError, ParameterField, Result, WeatherParameterSet};
use acms_engine::{PredictionReport, RecurrenceScorer, RiskClassifier};
use acms_viz::{NetworkDiagram, SvgSurface, TimeSeriesChart};
use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::DemoConfig;
use crate::events::AgentEvent;
use crate::lock;

/// What the results panel currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "report", rename_all = "snake_case")]
pub enum DisplayState {
    Idle,
    Processing,
    Ready(PredictionReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Network,
    Chart,
}

/// Redraw periods for the two panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedrawSchedule {
    pub network: Duration,
    pub chart: Duration,
}

impl Default for RedrawSchedule {
    fn default() -> Self {
        Self {
            network: Duration::from_millis(3000),
            chart:   Duration::from_millis(5000),
        }
    }
}

pub struct DemoOrchestrator {
    scorer: RecurrenceScorer,
    classifier: RiskClassifier,
    rng: Mutex<StdRng>,
    parameters: watch::Sender<WeatherParameterSet>,
    display: watch::Sender<DisplayState>,
    network: Mutex<SvgSurface>,
    chart: Mutex<SvgSurface>,
    diagram: NetworkDiagram,
    series: TimeSeriesChart,
    events: broadcast::Sender<AgentEvent>,
    prediction_delay: Duration,
    /// `true` while no view is open.
    closed: watch::Sender<bool>,
    latest: Mutex<Option<(PredictionReport, DateTime<Utc>)>>,
}

impl DemoOrchestrator {
    /// Engine weights are drawn from the configured seed, or from entropy
    /// when no seed is set.
    pub fn new(config: &DemoConfig, events: broadcast::Sender<AgentEvent>) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scorer = RecurrenceScorer::from_rng(&mut rng);
        Self::build(config, scorer, rng, events)
    }

    /// Use a fixed scorer, e.g. one with known weights.
    pub fn with_scorer(
        config: &DemoConfig,
        scorer: RecurrenceScorer,
        events: broadcast::Sender<AgentEvent>,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::build(config, scorer, rng, events)
    }

    fn build(
        config: &DemoConfig,
        scorer: RecurrenceScorer,
        rng: StdRng,
        events: broadcast::Sender<AgentEvent>,
    ) -> Self {
        Self {
            scorer,
            classifier: RiskClassifier::new(),
            rng: Mutex::new(rng),
            parameters: watch::Sender::new(WeatherParameterSet::default()),
            display: watch::Sender::new(DisplayState::Idle),
            network: Mutex::new(SvgSurface::new(config.network_width, config.network_height)),
            chart: Mutex::new(SvgSurface::new(config.chart_width, config.chart_height)),
            diagram: NetworkDiagram::new(),
            series: TimeSeriesChart::new(),
            events,
            prediction_delay: config.prediction_delay(),
            closed: watch::Sender::new(true),
            latest: Mutex::new(None),
        }
    }

    pub fn scorer(&self) -> &RecurrenceScorer {
        &self.scorer
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    fn emit(&self, event: AgentEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    // ── Parameters ──────────────────────────────────────────────────────────

    pub fn parameters(&self) -> WeatherParameterSet {
        *self.parameters.borrow()
    }

    pub fn subscribe_parameters(&self) -> watch::Receiver<WeatherParameterSet> {
        self.parameters.subscribe()
    }

    /// Apply raw form input to one field. Unparseable text becomes 0 and the
    /// result is clamped to the field's range; this never fails.
    pub fn update_parameter(&self, field: ParameterField, raw: &str) -> WeatherParameterSet {
        let value = field.coerce(raw);
        self.replace_parameters(self.parameters().with_field(field, value))
    }

    /// Draw every field uniformly from its range, rounded to one decimal.
    pub fn randomize_parameters(&self) -> WeatherParameterSet {
        let next = {
            let mut rng = lock(&self.rng);
            WeatherParameterSet::randomize(&mut *rng)
        };
        debug!(?next, "parameters randomized");
        self.replace_parameters(next)
    }

    fn replace_parameters(&self, next: WeatherParameterSet) -> WeatherParameterSet {
        self.parameters.send_replace(next);
        self.emit(AgentEvent::ParametersChanged { parameters: next });
        next
    }

    // ── Prediction ──────────────────────────────────────────────────────────

    pub fn display_state(&self) -> DisplayState {
        self.display.borrow().clone()
    }

    pub fn subscribe_display(&self) -> watch::Receiver<DisplayState> {
        self.display.subscribe()
    }

    /// Most recent completed prediction and when it finished.
    pub fn latest_prediction(&self) -> Option<(PredictionReport, DateTime<Utc>)> {
        lock(&self.latest).clone()
    }

    /// Show the processing state, wait out the simulated delay, then score
    /// the current parameters, publish the report and redraw both panels.
    ///
    /// Fails with [`AcmsError::ViewClosed`] if no view is open or the view
    /// is torn down during the delay, and with [`AcmsError::Busy`] while
    /// another prediction is pending.
    pub async fn run_prediction(&self) -> Result<PredictionReport> {
        let mut closed = self.closed.subscribe();
        let already_closed = *closed.borrow_and_update();
        if already_closed {
            return Err(AcmsError::ViewClosed);
        }

        let started = self.display.send_if_modified(|state| {
            if matches!(state, DisplayState::Processing) {
                false
            } else {
                *state = DisplayState::Processing;
                true
            }
        });
        if !started {
            return Err(AcmsError::Busy("prediction already in progress".to_string()));
        }
        let pending = PendingPrediction { display: &self.display, settled: false };
        self.emit(AgentEvent::PredictionStarted);
        debug!(delay_ms = self.prediction_delay.as_millis() as u64, "prediction pending");

        let cancelled = tokio::select! {
            _ = tokio::time::sleep(self.prediction_delay) => false,
            _ = closed.wait_for(|c| *c) => true,
        };
        if cancelled || self.is_closed() {
            debug!("pending prediction cancelled");
            return Err(AcmsError::ViewClosed);
        }

        let parameters = self.parameters();
        let result = self.scorer.score_parameters(&parameters);
        let report = {
            let mut rng = lock(&self.rng);
            PredictionReport::build(&self.classifier, result, &mut *rng)
        };

        self.display.send_replace(DisplayState::Ready(report.clone()));
        pending.settle();
        *lock(&self.latest) = Some((report.clone(), Utc::now()));
        info!(
            tier = report.tier.label(),
            probability = result.risk_probability,
            confidence = result.confidence,
            "prediction ready"
        );
        self.emit(AgentEvent::PredictionReady { report: report.clone() });

        self.redraw(Panel::Network);
        self.redraw(Panel::Chart);
        Ok(report)
    }

    // ── Panels ──────────────────────────────────────────────────────────────

    fn surface(&self, panel: Panel) -> &Mutex<SvgSurface> {
        match panel {
            Panel::Network => &self.network,
            Panel::Chart   => &self.chart,
        }
    }

    /// Redraw one panel. Returns `false` if no view is open or the surface
    /// is degenerate; the previous frame is kept in both cases.
    pub fn redraw(&self, panel: Panel) -> bool {
        let mut surface = lock(self.surface(panel));
        // Checked under the surface lock so teardown can fence out redraws.
        if self.is_closed() {
            return false;
        }
        let drawn = {
            let mut rng = lock(&self.rng);
            match panel {
                Panel::Network => self.diagram.render(&mut *surface, &mut *rng),
                Panel::Chart   => self.series.render(&mut *surface, &mut *rng),
            }
        };
        drop(surface);

        if drawn {
            self.emit(match panel {
                Panel::Network => AgentEvent::NetworkRedrawn,
                Panel::Chart   => AgentEvent::ChartRedrawn,
            });
        }
        drawn
    }

    /// SVG document of the panel's last frame.
    pub fn panel_svg(&self, panel: Panel) -> String {
        lock(self.surface(panel)).to_svg()
    }

    /// Resize a panel's surface; takes effect on the next redraw.
    pub fn resize(&self, panel: Panel, width: f64, height: f64) {
        lock(self.surface(panel)).resize(width, height);
    }

    /// Wait until any in-flight draw on either panel has finished.
    fn fence_redraws(&self) {
        drop(lock(&self.network));
        drop(lock(&self.chart));
    }
}

/// Puts the display back to Idle when a prediction ends without publishing
/// a report, including when its future is dropped during the delay.
struct PendingPrediction<'a> {
    display: &'a watch::Sender<DisplayState>,
    settled: bool,
}

impl PendingPrediction<'_> {
    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for PendingPrediction<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        self.display.send_if_modified(|state| {
            if matches!(state, DisplayState::Processing) {
                *state = DisplayState::Idle;
                true
            } else {
                false
            }
        });
    }
}

/// Handle for an open demo view. Only one view should be open per
/// orchestrator at a time.
pub struct DemoView {
    orchestrator: Arc<DemoOrchestrator>,
    timers: Vec<JoinHandle<()>>,
    torn_down: bool,
}

impl DemoView {
    /// Draw both panels once and start the redraw timers.
    /// Must be called from within a Tokio runtime.
    pub fn open(orchestrator: Arc<DemoOrchestrator>, schedule: RedrawSchedule) -> Self {
        orchestrator.closed.send_replace(false);
        orchestrator.redraw(Panel::Network);
        orchestrator.redraw(Panel::Chart);

        let timers = vec![
            spawn_redraw_loop(orchestrator.clone(), Panel::Network, schedule.network),
            spawn_redraw_loop(orchestrator.clone(), Panel::Chart, schedule.chart),
        ];
        info!(
            network_ms = schedule.network.as_millis() as u64,
            chart_ms = schedule.chart.as_millis() as u64,
            "demo view opened"
        );
        Self { orchestrator, timers, torn_down: false }
    }

    pub fn is_open(&self) -> bool {
        !self.torn_down
    }

    /// Stop both redraw timers and cancel a pending prediction. Once this
    /// returns no further draw touches either surface. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        self.orchestrator.closed.send_replace(true);
        for timer in self.timers.drain(..) {
            timer.abort();
        }
        self.orchestrator.fence_redraws();
        self.orchestrator.emit(AgentEvent::ViewClosed);
        info!("demo view torn down");
    }
}

impl Drop for DemoView {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn spawn_redraw_loop(
    orchestrator: Arc<DemoOrchestrator>,
    panel: Panel,
    period: Duration,
) -> JoinHandle<()> {
    let period = period.max(Duration::from_millis(1));
    let mut closed = orchestrator.closed.subscribe();
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    orchestrator.redraw(panel);
                }
                _ = closed.wait_for(|c| *c) => break,
            }
        }
        debug!(?panel, "redraw loop stopped");
    })
}

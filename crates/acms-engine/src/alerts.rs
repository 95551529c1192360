//! Synthetic detection alerts for the monitoring dashboard.
//!
//! The feed is a capped, newest-first list with no backing store. New
//! alerts are prepended and the oldest entries fall off the end.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_ALERTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Fire,
    Flood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
}

impl AlertSeverity {
    pub const ALL: [AlertSeverity; 3] = [AlertSeverity::High, AlertSeverity::Medium, AlertSeverity::Low];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub location: String,
    /// Detection confidence, percent
    pub confidence: u8,
    /// Display label such as "Just now" or "15 min ago"
    pub time: String,
    /// `[latitude, longitude]`
    pub coordinates: [f64; 2],
    pub detected_at: DateTime<Utc>,
}

impl Alert {
    /// A fresh detection at a random location.
    pub fn synthesize<R: Rng + ?Sized>(id: i64, rng: &mut R) -> Self {
        let kind = if rng.gen::<f64>() > 0.5 { AlertKind::Fire } else { AlertKind::Flood };
        let severity = AlertSeverity::ALL[rng.gen_range(0..AlertSeverity::ALL.len())];
        Self {
            id,
            kind,
            severity,
            location: "New Detection Zone".to_string(),
            confidence: rng.gen_range(80..100),
            time: "Just now".to_string(),
            coordinates: [
                rng.gen::<f64>() * 180.0 - 90.0,
                rng.gen::<f64>() * 360.0 - 180.0,
            ],
            detected_at: Utc::now(),
        }
    }
}

fn seed_alerts(now: DateTime<Utc>) -> Vec<Alert> {
    vec![
        Alert {
            id: 1,
            kind: AlertKind::Fire,
            severity: AlertSeverity::High,
            location: "California, USA".to_string(),
            confidence: 94,
            time: "2 min ago".to_string(),
            coordinates: [37.7749, -122.4194],
            detected_at: now - Duration::minutes(2),
        },
        Alert {
            id: 2,
            kind: AlertKind::Flood,
            severity: AlertSeverity::Medium,
            location: "Bangladesh".to_string(),
            confidence: 87,
            time: "15 min ago".to_string(),
            coordinates: [23.6850, 90.3563],
            detected_at: now - Duration::minutes(15),
        },
        Alert {
            id: 3,
            kind: AlertKind::Fire,
            severity: AlertSeverity::Low,
            location: "Australia".to_string(),
            confidence: 76,
            time: "1 hour ago".to_string(),
            coordinates: [-25.2744, 133.7751],
            detected_at: now - Duration::hours(1),
        },
    ]
}

/// Counters for the dashboard stats card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStats {
    pub total_alerts: u64,
    pub active_incidents: u32,
    pub areas_monitored: u32,
    /// Percent
    pub accuracy: f64,
}

/// Figures the dashboard starts from before any scan has run.
pub const BASELINE_STATS: AlertStats = AlertStats {
    total_alerts: 247,
    active_incidents: 12,
    areas_monitored: 1847,
    accuracy: 92.4,
};

/// Capped, newest-first alert list.
#[derive(Debug, Clone)]
pub struct AlertFeed {
    alerts: VecDeque<Alert>,
    capacity: usize,
    last_id: i64,
    /// Detections since the feed was created; not capped.
    detected: u64,
}

impl Default for AlertFeed {
    fn default() -> Self {
        Self::seeded(DEFAULT_MAX_ALERTS)
    }
}

impl AlertFeed {
    /// Empty feed holding at most `capacity` alerts (at least one).
    pub fn new(capacity: usize) -> Self {
        Self { alerts: VecDeque::new(), capacity: capacity.max(1), last_id: 0, detected: 0 }
    }

    /// Feed pre-populated with the three dashboard sample alerts.
    pub fn seeded(capacity: usize) -> Self {
        let mut feed = Self::new(capacity);
        for alert in seed_alerts(Utc::now()).into_iter().rev() {
            feed.push(alert);
        }
        feed
    }

    /// Prepend `alert`, dropping the oldest entries beyond capacity.
    pub fn push(&mut self, alert: Alert) {
        self.last_id = self.last_id.max(alert.id);
        self.alerts.push_front(alert);
        self.alerts.truncate(self.capacity);
    }

    /// Synthesize a new alert, prepend it and return a copy.
    pub fn detect<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Alert {
        let id = self.next_id();
        let alert = Alert::synthesize(id, rng);
        self.push(alert.clone());
        self.detected += 1;
        alert
    }

    /// The baseline figures with every detection added to the total.
    pub fn stats(&self) -> AlertStats {
        AlertStats {
            total_alerts: BASELINE_STATS.total_alerts + self.detected,
            ..BASELINE_STATS
        }
    }

    /// Millisecond timestamp, bumped if needed so ids stay strictly increasing.
    fn next_id(&self) -> i64 {
        Utc::now().timestamp_millis().max(self.last_id + 1)
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn to_vec(&self) -> Vec<Alert> {
        self.alerts.iter().cloned().collect()
    }
}

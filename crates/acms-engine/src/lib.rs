//! acms-engine — Predictive risk engine.
//!
//! A fixed, non-learning recurrence turns a weather parameter vector into a
//! risk probability and a confidence score; the classifier maps that
//! probability onto a discrete tier. The alert feed backs the monitoring
//! dashboard with synthetic detections.

pub mod weights;
pub mod scorer;
pub mod classifier;
pub mod alerts;

pub use weights::WeightVector;
pub use scorer::{PredictionResult, RecurrenceScorer};
pub use classifier::{ConfidenceBand, PredictionReport, RiskAssessment, RiskClassifier, RiskTier};
pub use alerts::{Alert, AlertFeed, AlertKind, AlertSeverity, AlertStats};

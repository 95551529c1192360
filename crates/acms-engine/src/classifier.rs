//! Threshold-based risk classification and the formatted result card.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::scorer::PredictionResult;

/// Probabilities below this are LOW.
pub const MEDIUM_THRESHOLD: f64 = 0.30;
/// Probabilities at or above this are HIGH.
pub const HIGH_THRESHOLD: f64 = 0.70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

const LOW_DESCRIPTIONS: [&str; 3] = [
    "Weather conditions are stable and within normal parameters",
    "Low probability of natural disaster occurrence",
    "Continue normal operations with standard monitoring",
];

const MEDIUM_DESCRIPTIONS: [&str; 3] = [
    "Weather patterns show some irregularities",
    "Increased monitoring recommended",
    "Prepare emergency protocols for activation",
];

const HIGH_DESCRIPTIONS: [&str; 3] = [
    "Critical weather conditions detected",
    "High probability of disaster occurrence",
    "Immediate action and evacuation may be required",
];

impl RiskTier {
    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low    => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High   => "HIGH",
        }
    }

    /// CSS class used by the result card.
    pub fn color_tag(self) -> &'static str {
        match self {
            RiskTier::Low    => "risk-low",
            RiskTier::Medium => "risk-medium",
            RiskTier::High   => "risk-high",
        }
    }

    pub fn descriptions(self) -> &'static [&'static str; 3] {
        match self {
            RiskTier::Low    => &LOW_DESCRIPTIONS,
            RiskTier::Medium => &MEDIUM_DESCRIPTIONS,
            RiskTier::High   => &HIGH_DESCRIPTIONS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub color_tag: &'static str,
}

/// Maps probabilities to tiers. Carries no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskClassifier;

impl RiskClassifier {
    pub fn new() -> Self {
        Self
    }

    /// `p < 0.30` → LOW, `p < 0.70` → MEDIUM, otherwise HIGH.
    /// Exact boundaries go to the more severe tier.
    pub fn classify(&self, probability: f64) -> RiskAssessment {
        let tier = if probability < MEDIUM_THRESHOLD {
            RiskTier::Low
        } else if probability < HIGH_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::High
        };
        RiskAssessment { tier, color_tag: tier.color_tag() }
    }

    /// Uniform pick from the tier's three descriptions.
    pub fn describe<R: Rng + ?Sized>(&self, tier: RiskTier, rng: &mut R) -> &'static str {
        let pool = tier.descriptions();
        pool[rng.gen_range(0..pool.len())]
    }
}

/// Qualitative confidence wording shown under the confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.8 {
            ConfidenceBand::High
        } else if confidence > 0.6 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceBand::Low    => "low",
            ConfidenceBand::Medium => "medium",
            ConfidenceBand::High   => "high",
        }
    }

    pub fn sentence(self) -> String {
        format!("Model shows {} confidence in this prediction", self.as_str())
    }
}

/// Everything the results panel displays for one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionReport {
    pub tier: RiskTier,
    pub color_tag: &'static str,
    pub description: &'static str,
    /// Risk bar fill, 0–100
    pub risk_percent: f64,
    /// Confidence bar fill, 0–100
    pub confidence_percent: f64,
    /// Rounded figure shown as "NN%"
    pub confidence_display: u32,
    pub confidence_band: ConfidenceBand,
    pub confidence_text: String,
    pub result: PredictionResult,
}

impl PredictionReport {
    pub fn build<R: Rng + ?Sized>(
        classifier: &RiskClassifier,
        result: PredictionResult,
        rng: &mut R,
    ) -> Self {
        let assessment = classifier.classify(result.risk_probability);
        let band = ConfidenceBand::from_confidence(result.confidence);
        Self {
            tier: assessment.tier,
            color_tag: assessment.color_tag,
            description: classifier.describe(assessment.tier, rng),
            risk_percent: result.risk_probability * 100.0,
            confidence_percent: result.confidence * 100.0,
            confidence_display: (result.confidence * 100.0).round() as u32,
            confidence_band: band,
            confidence_text: band.sentence(),
            result,
        }
    }
}

//! Recurrence scorer.
//!
//! Runs a fixed LSTM-shaped recurrence over the input vector:
//!
//! ```text
//! forget    = σ(h·0.1 + x·w)
//! input     = σ(h·0.2 + x·w)
//! candidate = tanh(h·0.3 + x·w)
//! output    = σ(h·0.4 + x·w)
//! c         = c·forget + input·candidate
//! h         = output · tanh(c)
//! ```
//!
//! There is no training. The gate coefficients and the fallback weight are
//! part of the observable output and must not change.

use acms_common::WeatherParameterSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::weights::WeightVector;

const FORGET_COEFF: f64 = 0.1;
const INPUT_COEFF: f64 = 0.2;
const CANDIDATE_COEFF: f64 = 0.3;
const OUTPUT_COEFF: f64 = 0.4;

pub const CONFIDENCE_FLOOR: f64 = 0.60;
pub const CONFIDENCE_CEIL: f64 = 0.95;

/// Output of one scorer invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// σ(hidden), in [0, 1]
    pub risk_probability: f64,
    /// In [0.60, 0.95]
    pub confidence: f64,
    pub hidden_state: f64,
    pub cell_state: f64,
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// `clamp(|h|·0.3 + 0.6, 0.60, 0.95)`
pub fn confidence_from_hidden(hidden: f64) -> f64 {
    (hidden.abs() * 0.3 + 0.6).clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEIL)
}

/// Stateless-per-call scoring engine. Owns its weights exclusively.
#[derive(Debug, Clone)]
pub struct RecurrenceScorer {
    weights: WeightVector,
}

impl RecurrenceScorer {
    pub fn new(weights: WeightVector) -> Self {
        Self { weights }
    }

    /// Draw fresh weights from the given random source.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let weights = WeightVector::random(rng);
        tracing::debug!(weights = ?weights.as_array(), "scorer weights initialised");
        Self::new(weights)
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    /// Run the recurrence once over `inputs`, in order.
    ///
    /// The loop length is the input length; indices past the weight vector
    /// use the fallback weight.
    pub fn score(&self, inputs: &[f64]) -> PredictionResult {
        let mut hidden = 0.0_f64;
        let mut cell = 0.0_f64;

        for (i, &x) in inputs.iter().enumerate() {
            let drive = x * self.weights.get(i);

            let forget    = sigmoid(hidden * FORGET_COEFF + drive);
            let input     = sigmoid(hidden * INPUT_COEFF + drive);
            let candidate = (hidden * CANDIDATE_COEFF + drive).tanh();
            let output    = sigmoid(hidden * OUTPUT_COEFF + drive);

            cell = cell * forget + input * candidate;
            hidden = output * cell.tanh();
        }

        PredictionResult {
            risk_probability: sigmoid(hidden),
            confidence: confidence_from_hidden(hidden),
            hidden_state: hidden,
            cell_state: cell,
        }
    }

    pub fn score_parameters(&self, params: &WeatherParameterSet) -> PredictionResult {
        self.score(&params.as_vector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use acms_test_utils::{golden_parameters, seeded_rng, GOLDEN_WEIGHT};
    use pretty_assertions::assert_eq;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-12, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_zero_inputs_give_neutral_result() {
        let mut rng = seeded_rng(1);
        for _ in 0..20 {
            let scorer = RecurrenceScorer::from_rng(&mut rng);
            let result = scorer.score(&[0.0; 8]);
            assert_eq!(result.risk_probability, 0.5);
            assert_eq!(result.confidence, 0.6);
            assert_eq!(result.hidden_state, 0.0);
        }
    }

    #[test]
    fn test_empty_input_is_accepted() {
        let scorer = RecurrenceScorer::new(WeightVector::uniform(0.02));
        let result = scorer.score(&[]);
        assert_eq!(result.risk_probability, 0.5);
        assert_eq!(result.cell_state, 0.0);
    }

    #[test]
    fn test_golden_value_with_fixed_weights() {
        let scorer = RecurrenceScorer::new(WeightVector::uniform(GOLDEN_WEIGHT));
        let result = scorer.score_parameters(&golden_parameters());
        assert_close(result.risk_probability, 0.582100377216755);
        assert_close(result.confidence, 0.6994204906499399);
        assert_close(result.hidden_state, 0.33140163549979973);
        assert_close(result.cell_state, 0.6131948978404796);
    }

    #[test]
    fn test_single_step_matches_hand_computation() {
        let scorer = RecurrenceScorer::new(WeightVector::uniform(0.01));
        let result = scorer.score(&[1.0]);
        // h0 = 0: every gate sees only x·w = 0.01
        let g = sigmoid(0.01);
        let cell = g * 0.01_f64.tanh();
        let hidden = g * cell.tanh();
        assert_close(result.cell_state, cell);
        assert_close(result.hidden_state, hidden);
        assert_close(result.risk_probability, sigmoid(hidden));
    }

    #[test]
    fn test_deterministic_for_fixed_weights() {
        let scorer = RecurrenceScorer::from_rng(&mut seeded_rng(3));
        let inputs = golden_parameters().as_vector();
        let a = scorer.score(&inputs);
        let b = scorer.score(&inputs);
        assert_eq!(a.risk_probability.to_bits(), b.risk_probability.to_bits());
        assert_eq!(a.confidence.to_bits(), b.confidence.to_bits());
        assert_eq!(a.hidden_state.to_bits(), b.hidden_state.to_bits());
        assert_eq!(a.cell_state.to_bits(), b.cell_state.to_bits());
    }

    #[test]
    fn test_new_weights_change_output() {
        let inputs = golden_parameters().as_vector();
        let a = RecurrenceScorer::from_rng(&mut seeded_rng(11)).score(&inputs);
        let b = RecurrenceScorer::from_rng(&mut seeded_rng(12)).score(&inputs);
        assert_ne!(a.hidden_state, b.hidden_state);
    }

    #[test]
    fn test_input_order_matters() {
        let scorer = RecurrenceScorer::new(WeightVector::uniform(0.01));
        let forward = scorer.score(&[100.0, 0.0, -100.0]);
        let reverse = scorer.score(&[-100.0, 0.0, 100.0]);
        assert_ne!(forward.hidden_state, reverse.hidden_state);
    }

    #[test]
    fn test_fallback_weight_beyond_fifteen_inputs() {
        // Indices 15.. must behave as if the vector were extended with 0.01s.
        let scorer = RecurrenceScorer::new(WeightVector::uniform(0.2));
        let inputs: Vec<f64> = (0..20).map(|i| (i as f64) - 7.5).collect();

        let mut hidden = 0.0_f64;
        let mut cell = 0.0_f64;
        for (i, &x) in inputs.iter().enumerate() {
            let w = if i < 15 { 0.2 } else { 0.01 };
            let forget = sigmoid(hidden * 0.1 + x * w);
            let input = sigmoid(hidden * 0.2 + x * w);
            let candidate = (hidden * 0.3 + x * w).tanh();
            let output = sigmoid(hidden * 0.4 + x * w);
            cell = cell * forget + input * candidate;
            hidden = output * cell.tanh();
        }

        let result = scorer.score(&inputs);
        assert_eq!(result.hidden_state, hidden);
        assert_eq!(result.cell_state, cell);
    }

    #[test]
    fn test_confidence_always_in_band() {
        let mut rng = seeded_rng(99);
        for _ in 0..200 {
            let scorer = RecurrenceScorer::from_rng(&mut rng);
            let inputs: Vec<f64> = (0..rng.gen_range(0..30))
                .map(|_| rng.gen_range(-1.0e4..1.0e4))
                .collect();
            let result = scorer.score(&inputs);
            assert!((CONFIDENCE_FLOOR..=CONFIDENCE_CEIL).contains(&result.confidence));
            assert!((0.0..=1.0).contains(&result.risk_probability));
        }
    }

    #[test]
    fn test_confidence_clamp() {
        assert_eq!(confidence_from_hidden(0.0), 0.6);
        assert_eq!(confidence_from_hidden(5.0), 0.95);
        assert_eq!(confidence_from_hidden(-5.0), 0.95);
        assert_close(confidence_from_hidden(-0.5), 0.75);
    }
}

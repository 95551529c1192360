//! Weight vector for the recurrence scorer.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of weights drawn per engine instance.
pub const WEIGHT_COUNT: usize = 15;

/// Weight used for any input index past the end of the vector.
pub const FALLBACK_WEIGHT: f64 = 0.01;

/// Half-width of the uniform initialisation interval `[-0.05, 0.05)`.
pub const INIT_SPREAD: f64 = 0.05;

/// The 15-component weight vector W.
/// Drawn once at engine construction and never updated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector([f64; WEIGHT_COUNT]);

impl WeightVector {
    /// Uniform draw in `[-0.05, 0.05)` for every component.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut weights = [0.0; WEIGHT_COUNT];
        for w in weights.iter_mut() {
            *w = rng.gen::<f64>() * (2.0 * INIT_SPREAD) - INIT_SPREAD;
        }
        Self(weights)
    }

    /// Every component set to `value`.
    pub fn uniform(value: f64) -> Self {
        Self([value; WEIGHT_COUNT])
    }

    /// Weight for input index `i`, falling back to 0.01 past the end.
    pub fn get(&self, i: usize) -> f64 {
        self.0.get(i).copied().unwrap_or(FALLBACK_WEIGHT)
    }

    pub fn as_array(&self) -> [f64; WEIGHT_COUNT] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_random_weights_within_spread() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let w = WeightVector::random(&mut rng);
            assert!(w.as_array().iter().all(|&x| (-INIT_SPREAD..INIT_SPREAD).contains(&x)));
        }
    }

    #[test]
    fn test_fallback_past_end() {
        let w = WeightVector::uniform(0.03);
        assert_eq!(w.get(0), 0.03);
        assert_eq!(w.get(WEIGHT_COUNT - 1), 0.03);
        assert_eq!(w.get(WEIGHT_COUNT), FALLBACK_WEIGHT);
        assert_eq!(w.get(1_000), FALLBACK_WEIGHT);
    }

    #[test]
    fn test_same_seed_same_weights() {
        let a = WeightVector::random(&mut StdRng::seed_from_u64(9));
        let b = WeightVector::random(&mut StdRng::seed_from_u64(9));
        let c = WeightVector::random(&mut StdRng::seed_from_u64(10));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}

//! acms-test-utils — Fixtures shared by the ACMS test suites.

use acms_common::WeatherParameterSet;
use rand::{rngs::StdRng, SeedableRng};

/// Weight used by the golden-value regression scenario.
pub const GOLDEN_WEIGHT: f64 = 0.01;

/// Deterministic random source for reproducible tests.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// The demo page defaults, `{25, 60, 1013, 10, 180, 0, 10, 30}`.
pub fn golden_parameters() -> WeatherParameterSet {
    WeatherParameterSet::from_raw([25.0, 60.0, 1013.0, 10.0, 180.0, 0.0, 10.0, 30.0])
}

/// Every field at its declared maximum.
pub fn extreme_parameters() -> WeatherParameterSet {
    WeatherParameterSet::from_raw([60.0, 100.0, 1050.0, 200.0, 360.0, 500.0, 50.0, 100.0])
}

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();
}

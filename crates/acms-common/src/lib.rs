//! acms-common — Shared types and errors used across all ACMS crates.

pub mod error;
pub mod parameters;

// Re-export commonly used types
pub use error::{AcmsError, ApiError, Result};
pub use parameters::{ParameterField, ParameterRange, WeatherParameterSet};

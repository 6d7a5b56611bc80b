//! Prediction service client module
//!
//! Liveness probe plus scoring request against the remote prediction API.

pub mod prediction;

// Re-export commonly used types
pub use prediction::{ClientConfig, PredictionClient};

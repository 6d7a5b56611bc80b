//! sepsischeck - Sepsis Prediction Client
//!
//! Collects patient vital signs, sends them to the remote prediction API
//! and reports the predicted label with its probability.
//!
//! # Architecture
//!
//! - **types**: request payload and decoded result
//! - **client**: liveness probe + scoring call
//! - **form**: field catalogue, bounds and interactive entry
//! - **config / cli / telemetry / display**: the terminal application

pub mod errors;
pub mod types;
pub mod client;
pub mod form;

// Re-export commonly used types
pub use errors::{PredictError, Result};
pub use client::PredictionClient;
pub use types::{InsuranceChoice, ModelKind, PredictionRequest, PredictionResult, SepsisLabel};

pub mod cli;
pub mod config;
pub mod telemetry;
pub mod display;

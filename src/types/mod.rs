//! Type definitions module
//!
//! The two transient values of a submission: what goes to the scoring
//! service and what comes back.

pub mod request;
pub mod result;

// Re-export commonly used types
pub use request::{InsuranceChoice, ModelKind, PredictionRequest};
pub use result::{PredictionResult, SepsisLabel};

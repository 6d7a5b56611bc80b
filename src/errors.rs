//! Error types for sepsischeck
//!
//! Every failure is terminal for the current submission only; nothing here
//! is fatal to the process.

use thiserror::Error;

/// Main error type for the prediction client
#[derive(Error, Debug)]
pub enum PredictError {
    /// Liveness probe did not answer with HTTP 200
    #[error("Unable to connect to the server. Try Again Later.")]
    ServiceUnreachable,

    /// Scoring call answered with a non-200 status
    #[error("Prediction request failed with HTTP {status}")]
    RequestFailed { status: u16 },

    /// Scoring call exceeded its bounded wait
    #[error("Prediction request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Scoring body could not be decoded into a result
    #[error("Malformed prediction response: {0}")]
    MalformedResponse(String),

    /// Form field outside the accepted range
    #[error("Invalid value for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, PredictError>;

impl PredictError {
    /// Errors the user should answer by trying again later.
    ///
    /// The UI renders all of these the same way as an unreachable service.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            PredictError::ServiceUnreachable
                | PredictError::RequestFailed { .. }
                | PredictError::Timeout { .. }
                | PredictError::MalformedResponse(_)
                | PredictError::HttpError(_)
        )
    }

    /// Process exit code for one-shot mode
    pub fn exit_code(&self) -> i32 {
        match self {
            PredictError::ServiceUnreachable => 2,
            _ => 1,
        }
    }

    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        PredictError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

//! Prediction results decoded from the scoring service
//!
//! Expected body: `{"results": {"prediction": string, "probability": number}}`.
//! Anything else is reported as a malformed response.

use crate::errors::{PredictError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two categorical outcomes of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SepsisLabel {
    Positive,
    Negative,
}

impl SepsisLabel {
    /// Case-insensitive label match
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(SepsisLabel::Positive),
            "negative" => Some(SepsisLabel::Negative),
            _ => None,
        }
    }
}

impl fmt::Display for SepsisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SepsisLabel::Positive => f.write_str("Positive"),
            SepsisLabel::Negative => f.write_str("Negative"),
        }
    }
}

/// Classification plus percentage-scale probability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: SepsisLabel,
    /// Label exactly as the service returned it
    pub prediction: String,
    pub probability: f64,
}

#[derive(Debug, Deserialize)]
struct ScoringResponse {
    results: Option<ScoringResults>,
}

#[derive(Debug, Deserialize)]
struct ScoringResults {
    prediction: Option<String>,
    probability: Option<f64>,
}

impl PredictionResult {
    /// Decode a scoring response body
    pub fn from_body(body: &str) -> Result<Self> {
        let response: ScoringResponse = serde_json::from_str(body)
            .map_err(|e| PredictError::MalformedResponse(format!("invalid JSON body: {}", e)))?;

        let results = response
            .results
            .ok_or_else(|| PredictError::MalformedResponse("missing 'results' object".to_string()))?;

        let prediction = results.prediction.ok_or_else(|| {
            PredictError::MalformedResponse("missing 'results.prediction'".to_string())
        })?;
        let probability = results.probability.ok_or_else(|| {
            PredictError::MalformedResponse("missing 'results.probability'".to_string())
        })?;

        let label = SepsisLabel::parse(&prediction).ok_or_else(|| {
            PredictError::MalformedResponse(format!("unknown prediction label '{}'", prediction))
        })?;

        if !(0.0..=100.0).contains(&probability) {
            return Err(PredictError::MalformedResponse(format!(
                "probability {} outside [0, 100]",
                probability
            )));
        }

        Ok(Self {
            label,
            prediction,
            probability,
        })
    }

    pub fn is_positive(&self) -> bool {
        self.label == SepsisLabel::Positive
    }

    /// One-line verdict shown above the probability
    pub fn headline(&self) -> &'static str {
        match self.label {
            SepsisLabel::Positive => "Patient is likely to develop sepsis.",
            SepsisLabel::Negative => "Patient is unlikely to develop sepsis.",
        }
    }

    pub fn probability_display(&self) -> String {
        format!("Probability: {:.2}%", self.probability)
    }
}

//! Request types sent to the prediction service
//!
//! `PredictionRequest` serializes directly into the flat wire payload:
//! `{"PRG", "PL", "PR", "SK", "TS", "M11", "BD2", "Age", "Insurance"}`.

use crate::errors::{PredictError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scoring backend exposed by the prediction service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    #[default]
    Xgboost,
    #[value(name = "random_forest", alias = "random-forest")]
    RandomForest,
}

impl ModelKind {
    pub const ALL: [ModelKind; 2] = [ModelKind::Xgboost, ModelKind::RandomForest];

    /// Path segment of the scoring endpoint for this model
    pub fn endpoint(&self) -> &'static str {
        match self {
            ModelKind::Xgboost => "xgboost_prediction",
            ModelKind::RandomForest => "random_forest_prediction",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Xgboost => "xgboost",
            ModelKind::RandomForest => "random_forest",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xgboost" => Ok(ModelKind::Xgboost),
            "random_forest" | "random-forest" => Ok(ModelKind::RandomForest),
            other => Err(PredictError::invalid(
                "model",
                format!("unknown model '{}' (expected xgboost or random_forest)", other),
            )),
        }
    }
}

/// Yes/No insurance choice; goes over the wire as 1/0
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "PascalCase")]
pub enum InsuranceChoice {
    Yes,
    No,
}

impl InsuranceChoice {
    pub fn as_flag(&self) -> u8 {
        match self {
            InsuranceChoice::Yes => 1,
            InsuranceChoice::No => 0,
        }
    }
}

impl Serialize for InsuranceChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_flag())
    }
}

impl From<bool> for InsuranceChoice {
    fn from(insured: bool) -> Self {
        if insured {
            InsuranceChoice::Yes
        } else {
            InsuranceChoice::No
        }
    }
}

impl FromStr for InsuranceChoice {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "1" | "true" => Ok(InsuranceChoice::Yes),
            "no" | "n" | "0" | "false" => Ok(InsuranceChoice::No),
            other => Err(PredictError::invalid(
                "Insurance",
                format!("expected Yes or No, got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for InsuranceChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsuranceChoice::Yes => f.write_str("Yes"),
            InsuranceChoice::No => f.write_str("No"),
        }
    }
}

/// One form submission's worth of patient measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRequest {
    /// Plasma glucose
    #[serde(rename = "PRG")]
    pub prg: f64,
    /// Blood work result 1
    #[serde(rename = "PL")]
    pub pl: f64,
    /// Blood pressure
    #[serde(rename = "PR")]
    pub pr: f64,
    /// Blood work result 2
    #[serde(rename = "SK")]
    pub sk: f64,
    /// Blood work result 3
    #[serde(rename = "TS")]
    pub ts: f64,
    /// Body mass index
    #[serde(rename = "M11")]
    pub m11: f64,
    /// Blood work result 4
    #[serde(rename = "BD2")]
    pub bd2: f64,
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Insurance")]
    pub insurance: InsuranceChoice,
}

impl PredictionRequest {
    /// Wire payload as a JSON value
    pub fn to_payload(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn sample() -> PredictionRequest {
        PredictionRequest {
            prg: 120.0,
            pl: 80.0,
            pr: 70.0,
            sk: 30.0,
            ts: 50.0,
            m11: 25.4,
            bd2: 0.5,
            age: 45,
            insurance: InsuranceChoice::Yes,
        }
    }

    #[test]
    fn test_payload_field_names() {
        let payload = sample().to_payload().unwrap();
        let obj = payload.as_object().unwrap();
        assert_eq!(obj.len(), 9);
        for key in ["PRG", "PL", "PR", "SK", "TS", "M11", "BD2", "Age", "Insurance"] {
            assert!(obj.contains_key(key), "missing {}", key);
        }
        assert_eq!(payload["M11"], 25.4);
        assert_eq!(payload["Age"], 45);
        assert_eq!(payload["Insurance"], 1);
    }

    #[test]
    fn test_insurance_no_serializes_to_zero() {
        let mut request = sample();
        request.insurance = InsuranceChoice::No;
        let payload = request.to_payload().unwrap();
        assert_eq!(payload["Insurance"], 0);
    }

    #[test]
    fn test_insurance_parse() {
        assert_eq!("Yes".parse::<InsuranceChoice>().unwrap(), InsuranceChoice::Yes);
        assert_eq!(" y ".parse::<InsuranceChoice>().unwrap(), InsuranceChoice::Yes);
        assert_eq!("No".parse::<InsuranceChoice>().unwrap(), InsuranceChoice::No);
        assert!("maybe".parse::<InsuranceChoice>().is_err());
    }

    #[test]
    fn test_model_endpoints_differ() {
        assert_eq!(ModelKind::Xgboost.endpoint(), "xgboost_prediction");
        assert_eq!(ModelKind::RandomForest.endpoint(), "random_forest_prediction");
        assert_eq!("random_forest".parse::<ModelKind>().unwrap(), ModelKind::RandomForest);
        assert!("svm".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_default_model_is_xgboost() {
        assert_eq!(ModelKind::default(), ModelKind::Xgboost);
    }

    #[quickcheck]
    fn prop_insurance_flag_matches_choice(insured: bool) -> bool {
        let mut request = sample();
        request.insurance = InsuranceChoice::from(insured);
        let payload = request.to_payload().unwrap();
        payload["Insurance"] == if insured { 1 } else { 0 }
    }
}

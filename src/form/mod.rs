//! Patient form
//!
//! Field catalogue, input bounds and conversion of raw entries into a
//! [`PredictionRequest`]. The form is the only place inputs are checked;
//! the client trusts what it is given.

pub mod prompt;

pub use prompt::FormPrompter;

use crate::errors::{PredictError, Result};
use crate::types::{InsuranceChoice, PredictionRequest};

/// Oldest age the form accepts
pub const MAX_AGE: u32 = 100;

/// Form section headings, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Demographics,
    VitalSigns,
    BloodWork,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::Demographics => "Patient Demographics",
            Section::VitalSigns => "Vital Signs",
            Section::BloodWork => "Blood Work",
        }
    }
}

/// Kind of value a field collects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Measurement,
    Age,
    Insurance,
}

/// One entry of the form
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Wire key
    pub key: &'static str,
    pub label: &'static str,
    pub section: Section,
    pub kind: FieldKind,
}

/// All nine fields in entry order
pub const FIELDS: [FieldSpec; 9] = [
    FieldSpec { key: "Age", label: "Age", section: Section::Demographics, kind: FieldKind::Age },
    FieldSpec { key: "Insurance", label: "Insurance (Yes/No)", section: Section::Demographics, kind: FieldKind::Insurance },
    FieldSpec { key: "M11", label: "BMI", section: Section::VitalSigns, kind: FieldKind::Measurement },
    FieldSpec { key: "PR", label: "Blood Pressure", section: Section::VitalSigns, kind: FieldKind::Measurement },
    FieldSpec { key: "PRG", label: "PRG (plasma glucose)", section: Section::VitalSigns, kind: FieldKind::Measurement },
    FieldSpec { key: "PL", label: "PL (Blood Work Result 1)", section: Section::BloodWork, kind: FieldKind::Measurement },
    FieldSpec { key: "SK", label: "SK (Blood Work Result 2)", section: Section::BloodWork, kind: FieldKind::Measurement },
    FieldSpec { key: "TS", label: "TS (Blood Work Result 3)", section: Section::BloodWork, kind: FieldKind::Measurement },
    FieldSpec { key: "BD2", label: "BD2 (Blood Work Result 4)", section: Section::BloodWork, kind: FieldKind::Measurement },
];

/// Parse a measurement entry; must be finite and non-negative
pub fn parse_measurement(key: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| PredictError::invalid(key, format!("'{}' is not a number", raw.trim())))?;
    check_measurement(key, value)
}

pub fn check_measurement(key: &str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(PredictError::invalid(key, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(PredictError::invalid(key, "must not be negative"));
    }
    Ok(value)
}

/// Parse an age entry; whole years in 0..=100
pub fn parse_age(raw: &str) -> Result<u32> {
    let age: u32 = raw
        .trim()
        .parse()
        .map_err(|_| PredictError::invalid("Age", format!("'{}' is not a whole number", raw.trim())))?;
    check_age(age)
}

pub fn check_age(age: u32) -> Result<u32> {
    if age > MAX_AGE {
        return Err(PredictError::invalid("Age", format!("must be at most {}", MAX_AGE)));
    }
    Ok(age)
}

/// Raw values as entered on the command line
#[derive(Debug, Clone, Copy)]
pub struct FormInput {
    pub prg: f64,
    pub pl: f64,
    pub pr: f64,
    pub sk: f64,
    pub ts: f64,
    pub m11: f64,
    pub bd2: f64,
    pub age: u32,
    pub insurance: InsuranceChoice,
}

impl FormInput {
    /// Check every field and build the request
    pub fn validate(self) -> Result<PredictionRequest> {
        Ok(PredictionRequest {
            prg: check_measurement("PRG", self.prg)?,
            pl: check_measurement("PL", self.pl)?,
            pr: check_measurement("PR", self.pr)?,
            sk: check_measurement("SK", self.sk)?,
            ts: check_measurement("TS", self.ts)?,
            m11: check_measurement("M11", self.m11)?,
            bd2: check_measurement("BD2", self.bd2)?,
            age: check_age(self.age)?,
            insurance: self.insurance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> FormInput {
        FormInput {
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
    fn test_fields_cover_wire_keys() {
        let mut keys: Vec<_> = FIELDS.iter().map(|f| f.key).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["Age", "BD2", "Insurance", "M11", "PL", "PR", "PRG", "SK", "TS"]);
    }

    #[test]
    fn test_valid_input_builds_request() {
        let request = input().validate().unwrap();
        assert_eq!(request.bd2, 0.5);
        assert_eq!(request.age, 45);
        assert_eq!(request.insurance, InsuranceChoice::Yes);
    }

    #[test]
    fn test_negative_measurement_rejected() {
        let mut bad = input();
        bad.sk = -1.0;
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("SK"));
    }

    #[test]
    fn test_nan_rejected() {
        assert!(check_measurement("TS", f64::NAN).is_err());
        assert!(parse_measurement("TS", "inf").is_err());
    }

    #[test]
    fn test_age_bounds() {
        assert_eq!(parse_age("0").unwrap(), 0);
        assert_eq!(parse_age(" 100 ").unwrap(), 100);
        assert!(parse_age("101").is_err());
        assert!(parse_age("45.5").is_err());
        assert!(parse_age("-3").is_err());
    }

    #[test]
    fn test_parse_measurement() {
        assert_eq!(parse_measurement("M11", "25.40").unwrap(), 25.4);
        assert!(parse_measurement("M11", "abc").is_err());
    }
}

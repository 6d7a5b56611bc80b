//! Terminal rendering for sepsischeck
//!
//! The "Home" page, the processing spinner and the prediction verdict.

use crate::errors::{PredictError, Result};
use crate::types::{ModelKind, PredictionResult};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner refresh interval
const TICK: Duration = Duration::from_millis(100);

/// Text of the welcome page
pub fn about_text() -> String {
    let endpoints: Vec<String> = ModelKind::ALL
        .iter()
        .map(|model| format!("  - /{}: predictions using the {} model", model.endpoint(), model))
        .collect();

    format!(
        "This app uses machine learning models to predict the likelihood of a patient \
developing sepsis based on various medical indicators.

Key Features
  - Model Selection: XGBoost and Random Forest models are available.
  - Real-time Predictions: immediate sepsis risk from patient data.
  - User-friendly Interface: easy-to-use endpoints for making predictions.

How It Works
  1. Data Collection: plasma glucose, blood pressure, BMI, age, insurance and blood work.
  2. Model Prediction: the API returns a prediction and the probability of sepsis.
  3. Output: the prediction and probability are shown here.

Endpoints
{}

How to Use
  1. Run `sepsischeck predict --interactive` (or pass every field as a flag).
  2. Fill in the required input fields.
  3. Submit to get the prediction results.

About the Developer
  Name: Heldana Natnael
  Background: Expert in data science, machine learning, and software development.
  Contact: www.linkedin.com/in/heldana-n

---
(c) 2024 Sepsis Prediction Project. All rights reserved.",
        endpoints.join("\n")
    )
}

/// Print the welcome page
pub fn show_about() {
    println!("{}", "Welcome to the Sepsis Prediction App".bold().cyan());
    println!("{}", "=".repeat(40).cyan());
    println!("{}", about_text());
    println!();
}

/// Spinner shown while a submission is in flight
pub fn processing_spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Processing...");
    pb.enable_steady_tick(TICK);
    pb
}

/// Print the verdict and probability
pub fn show_result(result: &PredictionResult) {
    let headline = if result.is_positive() {
        result.headline().red().bold()
    } else {
        result.headline().green().bold()
    };
    println!();
    println!("{}", headline);
    println!("{}", result.probability_display().bold());
    println!();
}

/// Result as pretty JSON
pub fn result_json(model: ModelKind, result: &PredictionResult) -> Result<String> {
    let value = serde_json::json!({
        "model": model,
        "prediction": result.prediction,
        "probability": result.probability,
        "positive": result.is_positive(),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Print a submission failure
pub fn show_error(err: &PredictError) {
    if err.is_unavailable() {
        eprintln!("{}", PredictError::ServiceUnreachable.to_string().red());
        if !matches!(err, PredictError::ServiceUnreachable) {
            eprintln!("{}", format!("  ({})", err).dimmed());
        }
    } else {
        eprintln!("{} {}", "Error:".red().bold(), err.to_string().red());
    }
}

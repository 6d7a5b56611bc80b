//! Command-line argument parsing for sepsischeck
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::errors::{PredictError, Result};
use crate::form::FormInput;
use crate::types::{InsuranceChoice, ModelKind};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sepsischeck - Sepsis risk predictions from the terminal
#[derive(Parser, Debug)]
#[command(name = "sepsischeck")]
#[command(version)]
#[command(about = "Predict the likelihood of a patient developing sepsis", long_about = None)]
pub struct Args {
    /// Prediction service base URL (overrides the config file)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only the result is printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show what the app does and how to use it
    About,

    /// Submit patient measurements for a prediction
    Predict(PredictArgs),

    /// Check whether the prediction service is reachable
    Health,

    /// Display current configuration
    Config,
}

/// The patient form, as flags
#[derive(clap::Args, Debug, Clone)]
pub struct PredictArgs {
    /// Scoring model (defaults to the configured model)
    #[arg(short, long, value_enum)]
    pub model: Option<ModelKind>,

    /// Fill the form field by field instead of from flags
    #[arg(short, long)]
    pub interactive: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// PRG (plasma glucose)
    #[arg(long, required_unless_present = "interactive")]
    pub prg: Option<f64>,

    /// PL (blood work result 1)
    #[arg(long, required_unless_present = "interactive")]
    pub pl: Option<f64>,

    /// PR (blood pressure)
    #[arg(long, required_unless_present = "interactive")]
    pub pr: Option<f64>,

    /// SK (blood work result 2)
    #[arg(long, required_unless_present = "interactive")]
    pub sk: Option<f64>,

    /// TS (blood work result 3)
    #[arg(long, required_unless_present = "interactive")]
    pub ts: Option<f64>,

    /// M11 (BMI)
    #[arg(long, required_unless_present = "interactive")]
    pub m11: Option<f64>,

    /// BD2 (blood work result 4)
    #[arg(long, required_unless_present = "interactive")]
    pub bd2: Option<f64>,

    /// Age in whole years (0-100)
    #[arg(long, required_unless_present = "interactive")]
    pub age: Option<u32>,

    /// Whether the patient is insured
    #[arg(long, value_enum, ignore_case = true, required_unless_present = "interactive")]
    pub insurance: Option<InsuranceChoice>,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| PredictError::invalid(field, "is required"))
}

impl PredictArgs {
    /// Collect the flag values into form input
    pub fn form_input(&self) -> Result<FormInput> {
        Ok(FormInput {
            prg: required(self.prg, "PRG")?,
            pl: required(self.pl, "PL")?,
            pr: required(self.pr, "PR")?,
            sk: required(self.sk, "SK")?,
            ts: required(self.ts, "TS")?,
            m11: required(self.m11, "M11")?,
            bd2: required(self.bd2, "BD2")?,
            age: required(self.age, "Age")?,
            insurance: required(self.insurance, "Insurance")?,
        })
    }
}

impl Args {
    /// Get verbosity level based on flags, falling back to `default`
    pub fn verbosity_or(&self, default: Verbosity) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => default,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity_or(Verbosity::Normal)
    }
}

impl Verbosity {
    /// Parse the config file spelling
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Check if should show the spinner
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show request events
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }

    /// Check if should show the session summary
    pub fn show_details(&self) -> bool {
        matches!(self, Verbosity::VeryVerbose)
    }
}

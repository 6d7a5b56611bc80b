//! CLI module for sepsischeck
//!
//! Handles command-line argument parsing.

pub mod args;

pub use args::{Args, Commands, PredictArgs, Verbosity};

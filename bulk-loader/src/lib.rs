//! # Bulk Loader
//!
//! Command-line entry point that loads a CSV or newline-delimited JSON file
//! into an OpenSearch index.
//!
//! This crate provides argument parsing, dependency wiring and the run
//! summary for the bulk loader pipeline.

pub mod config;
pub mod summary;

pub use config::{Cli, Dependencies};
pub use summary::RunSummary;

use thiserror::Error;

/// Errors that can occur during loader initialization or execution.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] bulk_loader_pipeline::PipelineError),
}

impl LoaderError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

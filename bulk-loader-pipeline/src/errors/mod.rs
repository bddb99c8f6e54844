//! Error types for the bulk loader pipeline.

use std::path::PathBuf;

use bulk_loader_repository::DestinationError;
use thiserror::Error;

/// Errors that abort a pipeline run.
///
/// Per-document write failures are not errors: they are recorded as
/// unsuccessful `BulkOutcome`s and the run continues.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Invalid loader or destination configuration.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The input file extension is not a supported format.
    #[error(
        "Unsupported file format for {}: only .csv or newline-delimited JSON (.json, .log, .ndjson, .jsonl) are supported",
        .path.display()
    )]
    UnsupportedFormat { path: PathBuf },

    /// A CSV row or JSON line could not be parsed.
    #[error("Content format error at line {line}: {message}")]
    ContentFormat { line: u64, message: String },

    /// The input file is missing or unreadable.
    #[error("File error for {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The destination could not be reached while writing.
    #[error("Destination unavailable: {0}")]
    DestinationUnavailable(String),

    /// The destination rejected an index or bulk request.
    #[error("Destination error: {0}")]
    Destination(#[source] DestinationError),
}

impl PipelineError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create a content format error.
    pub fn content_format(line: u64, msg: impl Into<String>) -> Self {
        Self::ContentFormat {
            line,
            message: msg.into(),
        }
    }

    /// Create a file error.
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }
}

impl From<DestinationError> for PipelineError {
    fn from(err: DestinationError) -> Self {
        match err {
            DestinationError::ConfigurationError(msg) => Self::ConfigurationError(msg),
            DestinationError::Unavailable(msg) => Self::DestinationUnavailable(msg),
            other => Self::Destination(other),
        }
    }
}

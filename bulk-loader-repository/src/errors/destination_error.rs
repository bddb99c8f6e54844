//! Destination error types.
//!
//! This module defines the errors that can occur while talking to the
//! destination search store.

use thiserror::Error;

/// Errors that can occur during destination operations.
#[derive(Debug, Clone, Error)]
pub enum DestinationError {
    /// The client could not be configured (bad host, bad URL).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The destination could not be reached or the transport failed.
    #[error("Destination unavailable: {0}")]
    Unavailable(String),

    /// The destination answered with a non-success status.
    #[error("Request failed with status {status}: {reason}")]
    RequestFailed { status: u16, reason: String },

    /// The destination response could not be interpreted.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl DestinationError {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create an unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a request failed error.
    pub fn request_failed(status: u16, reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            reason: reason.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

//! OpenSearch implementation of the destination client.
//!
//! This module provides a concrete implementation of `DestinationClient`
//! using the OpenSearch Rust client.

mod bulk;
mod client;

pub use client::OpenSearchClient;

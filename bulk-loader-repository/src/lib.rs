//! # Bulk Loader Repository
//!
//! This crate provides the interface the loader uses to talk to the
//! destination search store, the errors it can produce, and a concrete
//! implementation for OpenSearch (and Elasticsearch-compatible clusters).

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use config::{DestinationConfig, IndexSettings};
pub use errors::DestinationError;
pub use interfaces::{DestinationClient, IndexCreation, IndexDeletion};
pub use self::opensearch::OpenSearchClient;

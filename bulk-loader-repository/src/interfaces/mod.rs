//! Interface definitions for the destination client.
//!
//! This module defines the abstract `DestinationClient` trait so the pipeline
//! can run against OpenSearch in production and against mocks in tests.

mod destination_client;

pub use destination_client::{DestinationClient, IndexCreation, IndexDeletion};

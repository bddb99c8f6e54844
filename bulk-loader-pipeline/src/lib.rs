//! # Bulk Loader Pipeline
//!
//! This crate provides the pipeline that streams records from a CSV or
//! newline-delimited JSON file into a search index using bulk writes.
//!
//! ## Architecture
//!
//! The pipeline is a single pull-based chain:
//!
//! 1. **Source**: Lazily parses the input file into raw records
//! 2. **Preparer**: Resolves each record's identity and strips reserved fields
//! 3. **Ingestor**: Submits documents in fixed-size bulk batches and accounts
//!    for every per-document outcome
//! 4. **Index manager**: Prepares the destination index and refreshes it
//!    once loading finishes
//! 5. **Orchestrator**: Wires the stages together for one dataset

pub mod dataset;
pub mod errors;
pub mod index_manager;
pub mod ingestor;
pub mod observer;
pub mod orchestrator;
pub mod preparer;
pub mod source;

#[cfg(test)]
mod test_support;

pub use dataset::DatasetSpec;
pub use errors::PipelineError;
pub use index_manager::IndexManager;
pub use ingestor::{BulkIngestor, IngestorConfig};
pub use observer::{Checkpoint, IngestObserver, TracingObserver};
pub use orchestrator::DatasetLoader;
pub use preparer::DocumentPreparer;
pub use source::RecordSource;

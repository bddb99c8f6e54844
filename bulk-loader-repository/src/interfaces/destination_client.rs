//! Destination client trait definition.

use async_trait::async_trait;

use crate::errors::DestinationError;
use bulk_loader_shared::{BulkOutcome, PreparedDocument};

/// Result of an index deletion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexDeletion {
    /// The index existed and was deleted.
    Deleted,
    /// There was no index with that name.
    NotFound,
}

/// Result of an index creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexCreation {
    /// The index was created.
    Created,
    /// An index with that name already existed.
    AlreadyExists,
}

/// Abstracts the destination search store.
///
/// Implementations are injected into the pipeline's index manager and bulk
/// ingestor. All implementations must be `Send + Sync`.
#[async_trait]
pub trait DestinationClient: Send + Sync {
    /// Check whether an index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, DestinationError>;

    /// Create an index with the client's configured settings.
    ///
    /// An index that already exists is reported as `IndexCreation::AlreadyExists`,
    /// not as an error.
    async fn create_index(&self, index: &str) -> Result<IndexCreation, DestinationError>;

    /// Delete an index.
    ///
    /// A missing index is reported as `IndexDeletion::NotFound`, not as an error.
    async fn delete_index(&self, index: &str) -> Result<IndexDeletion, DestinationError>;

    /// Make recently written documents visible to searches.
    async fn refresh_index(&self, index: &str) -> Result<(), DestinationError>;

    /// Write documents in a single bulk request.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<BulkOutcome>)` - One outcome per document, in request order.
    ///   Rejected documents are unsuccessful outcomes, not errors
    /// * `Err(DestinationError)` - If the request as a whole failed
    async fn bulk_write(
        &self,
        documents: &[PreparedDocument],
    ) -> Result<Vec<BulkOutcome>, DestinationError>;
}

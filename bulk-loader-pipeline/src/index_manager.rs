//! Destination index lifecycle: optional delete, idempotent create, refresh.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::errors::PipelineError;
use crate::observer::IngestObserver;
use bulk_loader_repository::{DestinationClient, IndexCreation, IndexDeletion};

/// Prepares the destination index before a load and refreshes it afterwards.
#[derive(Clone)]
pub struct IndexManager {
    client: Arc<dyn DestinationClient>,
    observer: Arc<dyn IngestObserver>,
}

impl IndexManager {
    pub fn new(client: Arc<dyn DestinationClient>, observer: Arc<dyn IngestObserver>) -> Self {
        Self { client, observer }
    }

    /// Make sure `index` exists, deleting it first when `delete_first` is set.
    ///
    /// Deleting a missing index is a no-op and only produces a warning. An
    /// index that already exists is left untouched, so calling this twice in
    /// a row is safe.
    ///
    /// # Returns
    ///
    /// * `Ok(IndexCreation::Created)` - The index was created by this call
    /// * `Ok(IndexCreation::AlreadyExists)` - The index was already present
    /// * `Err(PipelineError)` - If any other delete or create failure occurs
    #[instrument(skip(self))]
    pub async fn ensure_index(
        &self,
        index: &str,
        delete_first: bool,
    ) -> Result<IndexCreation, PipelineError> {
        if delete_first {
            match self.client.delete_index(index).await? {
                IndexDeletion::Deleted => info!(index = %index, "Deleted existing index"),
                IndexDeletion::NotFound => self
                    .observer
                    .warn(&format!("Index {} does not exist, nothing to delete", index)),
            }
        }

        if self.client.index_exists(index).await? {
            debug!(index = %index, "Index already exists");
            return Ok(IndexCreation::AlreadyExists);
        }

        let creation = self.client.create_index(index).await?;
        match creation {
            IndexCreation::Created => info!(index = %index, "Created index"),
            IndexCreation::AlreadyExists => debug!(index = %index, "Index created concurrently"),
        }

        Ok(creation)
    }

    /// Refresh `index` so loaded documents become searchable.
    ///
    /// A failed refresh is reported to the observer and returns `false`.
    #[instrument(skip(self))]
    pub async fn refresh(&self, index: &str) -> bool {
        match self.client.refresh_index(index).await {
            Ok(()) => {
                debug!(index = %index, "Refreshed index");
                true
            }
            Err(e) => {
                self.observer
                    .error(&format!("Failed to refresh index {}: {}", index, e));
                false
            }
        }
    }
}

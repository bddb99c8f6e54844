//! Shared fixtures for the pipeline integration tests.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

use bulk_loader_pipeline::{Checkpoint, IngestObserver};
use bulk_loader_repository::{DestinationClient, DestinationError, IndexCreation, IndexDeletion};
use bulk_loader_shared::{BulkOutcome, PreparedDocument, RawRecord};

#[derive(Default)]
pub struct ClusterState {
    pub indices: BTreeMap<String, BTreeMap<String, RawRecord>>,
    pub bulk_sizes: Vec<usize>,
    pub creates: usize,
    pub deletes: usize,
}

/// A single-node cluster held in memory. Documents whose id is in
/// `rejected` fail to index.
#[derive(Clone, Default)]
pub struct InMemoryCluster {
    pub state: Arc<Mutex<ClusterState>>,
    pub rejected: Vec<String>,
}

impl InMemoryCluster {
    pub async fn documents(&self, index: &str) -> BTreeMap<String, RawRecord> {
        let state = self.state.lock().await;
        state.indices.get(index).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DestinationClient for InMemoryCluster {
    async fn index_exists(&self, index: &str) -> Result<bool, DestinationError> {
        Ok(self.state.lock().await.indices.contains_key(index))
    }

    async fn create_index(&self, index: &str) -> Result<IndexCreation, DestinationError> {
        let mut state = self.state.lock().await;
        state.creates += 1;
        state.indices.entry(index.to_string()).or_default();
        Ok(IndexCreation::Created)
    }

    async fn delete_index(&self, index: &str) -> Result<IndexDeletion, DestinationError> {
        let mut state = self.state.lock().await;
        state.deletes += 1;
        match state.indices.remove(index) {
            Some(_) => Ok(IndexDeletion::Deleted),
            None => Ok(IndexDeletion::NotFound),
        }
    }

    async fn refresh_index(&self, _index: &str) -> Result<(), DestinationError> {
        Ok(())
    }

    async fn bulk_write(
        &self,
        documents: &[PreparedDocument],
    ) -> Result<Vec<BulkOutcome>, DestinationError> {
        let mut state = self.state.lock().await;
        state.bulk_sizes.push(documents.len());

        let outcomes = documents
            .iter()
            .map(|doc| {
                if self.rejected.contains(&doc.id) {
                    return BulkOutcome::failed(&doc.id, "index", "mapper_parsing_exception");
                }
                let index = state.indices.entry(doc.index.clone()).or_default();
                match index.insert(doc.id.clone(), doc.body.clone()) {
                    Some(_) => BulkOutcome::succeeded(&doc.id, "updated"),
                    None => BulkOutcome::succeeded(&doc.id, "created"),
                }
            })
            .collect();
        Ok(outcomes)
    }
}

#[derive(Default)]
pub struct CollectingObserver {
    pub checkpoints: StdMutex<Vec<Checkpoint>>,
    pub warnings: StdMutex<Vec<String>>,
    pub errors: StdMutex<Vec<String>>,
}

impl IngestObserver for CollectingObserver {
    fn progress(&self, checkpoint: &Checkpoint) {
        self.checkpoints.lock().unwrap().push(*checkpoint);
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

pub fn input_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

//! In-memory destination and observer used by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::observer::{Checkpoint, IngestObserver};
use bulk_loader_repository::{DestinationClient, DestinationError, IndexCreation, IndexDeletion};
use bulk_loader_shared::{BulkOutcome, PreparedDocument, RawRecord};

#[derive(Default)]
struct MockState {
    indices: HashSet<String>,
    documents: HashMap<String, HashMap<String, RawRecord>>,
    batch_sizes: Vec<usize>,
    create_calls: usize,
    delete_calls: usize,
    refreshes: Vec<String>,
}

/// Destination that keeps indices and documents in memory.
#[derive(Clone, Default)]
pub struct MockDestination {
    state: Arc<Mutex<MockState>>,
    failing_ids: HashSet<String>,
    failing_batch: Option<usize>,
    failing_refresh: bool,
    dropped_outcomes: usize,
}

impl MockDestination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `index` already present.
    pub async fn with_index(self, index: &str) -> Self {
        self.state.lock().await.indices.insert(index.to_string());
        self
    }

    /// Reject the documents with these identities.
    pub fn failing_ids(mut self, ids: &[&str]) -> Self {
        self.failing_ids = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    /// Fail the whole bulk request for the given 1-based batch number.
    pub fn failing_batch(mut self, batch: usize) -> Self {
        self.failing_batch = Some(batch);
        self
    }

    pub fn failing_refresh(mut self) -> Self {
        self.failing_refresh = true;
        self
    }

    /// Leave the last `count` outcomes out of every bulk response.
    pub fn dropping_outcomes(mut self, count: usize) -> Self {
        self.dropped_outcomes = count;
        self
    }

    pub async fn batch_sizes(&self) -> Vec<usize> {
        self.state.lock().await.batch_sizes.clone()
    }

    pub async fn has_index(&self, index: &str) -> bool {
        self.state.lock().await.indices.contains(index)
    }

    pub async fn document(&self, index: &str, id: &str) -> Option<RawRecord> {
        let state = self.state.lock().await;
        state.documents.get(index).and_then(|docs| docs.get(id)).cloned()
    }

    pub async fn document_count(&self, index: &str) -> usize {
        let state = self.state.lock().await;
        state.documents.get(index).map(HashMap::len).unwrap_or(0)
    }

    pub async fn create_calls(&self) -> usize {
        self.state.lock().await.create_calls
    }

    pub async fn delete_calls(&self) -> usize {
        self.state.lock().await.delete_calls
    }

    pub async fn refreshes(&self) -> Vec<String> {
        self.state.lock().await.refreshes.clone()
    }
}

#[async_trait]
impl DestinationClient for MockDestination {
    async fn index_exists(&self, index: &str) -> Result<bool, DestinationError> {
        Ok(self.state.lock().await.indices.contains(index))
    }

    async fn create_index(&self, index: &str) -> Result<IndexCreation, DestinationError> {
        let mut state = self.state.lock().await;
        state.create_calls += 1;
        if state.indices.insert(index.to_string()) {
            Ok(IndexCreation::Created)
        } else {
            Ok(IndexCreation::AlreadyExists)
        }
    }

    async fn delete_index(&self, index: &str) -> Result<IndexDeletion, DestinationError> {
        let mut state = self.state.lock().await;
        state.delete_calls += 1;
        if state.indices.remove(index) {
            state.documents.remove(index);
            Ok(IndexDeletion::Deleted)
        } else {
            Ok(IndexDeletion::NotFound)
        }
    }

    async fn refresh_index(&self, index: &str) -> Result<(), DestinationError> {
        if self.failing_refresh {
            return Err(DestinationError::request_failed(503, "refresh rejected"));
        }
        self.state.lock().await.refreshes.push(index.to_string());
        Ok(())
    }

    async fn bulk_write(
        &self,
        documents: &[PreparedDocument],
    ) -> Result<Vec<BulkOutcome>, DestinationError> {
        let mut state = self.state.lock().await;
        state.batch_sizes.push(documents.len());

        if self.failing_batch == Some(state.batch_sizes.len()) {
            return Err(DestinationError::request_failed(500, "bulk request rejected"));
        }

        let mut outcomes = Vec::with_capacity(documents.len());
        for doc in documents {
            if self.failing_ids.contains(&doc.id) {
                outcomes.push(BulkOutcome::failed(
                    &doc.id,
                    "index",
                    "mapper_parsing_exception: failed to parse",
                ));
                continue;
            }

            let index = state.documents.entry(doc.index.clone()).or_default();
            let operation = match index.insert(doc.id.clone(), doc.body.clone()) {
                Some(_) => "updated",
                None => "created",
            };
            outcomes.push(BulkOutcome::succeeded(&doc.id, operation));
        }

        let keep = outcomes.len().saturating_sub(self.dropped_outcomes);
        outcomes.truncate(keep);
        Ok(outcomes)
    }
}

/// Observer that records everything it receives.
#[derive(Default)]
pub struct RecordingObserver {
    checkpoints: StdMutex<Vec<Checkpoint>>,
    warnings: StdMutex<Vec<String>>,
    errors: StdMutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn checkpoints(&self) -> Vec<Checkpoint> {
        self.checkpoints.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl IngestObserver for RecordingObserver {
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

/// Documents `1..=count` for `index`, each with a `n` field.
pub fn documents(index: &str, count: usize) -> Vec<PreparedDocument> {
    (1..=count)
        .map(|n| {
            let mut body = RawRecord::new();
            body.insert("n".to_string(), serde_json::Value::from(n));
            PreparedDocument {
                id: n.to_string(),
                index: index.to_string(),
                body,
            }
        })
        .collect()
}

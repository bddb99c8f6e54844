//! Bulk ingestion of prepared documents.
//!
//! Documents are pulled from the input one batch at a time. A batch is
//! submitted and its outcomes reconciled before more input is read, so only
//! one batch is held in memory.

mod failures;

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, instrument};

use crate::errors::PipelineError;
use crate::index_manager::IndexManager;
use crate::observer::{Checkpoint, IngestObserver};
use bulk_loader_repository::DestinationClient;
use bulk_loader_shared::{BulkOutcome, IngestionReport, PreparedDocument};

pub use failures::{DrainedFailures, FailureBuffer};

/// Operation recorded for documents the destination did not answer for.
const MISSING_OPERATION: &str = "index";

/// Configuration for the bulk ingestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestorConfig {
    /// Documents per bulk request.
    pub chunk_size: usize,
    /// Failures kept between checkpoints.
    pub failure_capacity: usize,
}

impl Default for IngestorConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            failure_capacity: 10,
        }
    }
}

impl IngestorConfig {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.chunk_size == 0 {
            return Err(PipelineError::configuration(
                "chunk size must be greater than zero",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RunTotals {
    batches: u64,
    processed: u64,
    succeeded: u64,
    operations: BTreeSet<String>,
}

impl RunTotals {
    fn record(&mut self, outcome: BulkOutcome, failures: &mut FailureBuffer) {
        self.processed += 1;
        if outcome.success {
            self.succeeded += 1;
            self.operations.insert(outcome.operation);
        } else {
            failures.push(outcome);
        }
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            batches: self.batches,
            processed: self.processed,
            succeeded: self.succeeded,
        }
    }
}

/// Writes documents to the destination in fixed-size bulk batches.
///
/// Rejected documents are counted and reported but never stop the run.
/// Transport failures, non-success bulk responses and source errors do.
pub struct BulkIngestor {
    client: Arc<dyn DestinationClient>,
    observer: Arc<dyn IngestObserver>,
    index_manager: IndexManager,
    config: IngestorConfig,
}

impl BulkIngestor {
    /// Create a new ingestor with the default configuration.
    pub fn new(client: Arc<dyn DestinationClient>, observer: Arc<dyn IngestObserver>) -> Self {
        Self::with_config(client, observer, IngestorConfig::default())
    }

    /// Create a new ingestor with custom configuration.
    pub fn with_config(
        client: Arc<dyn DestinationClient>,
        observer: Arc<dyn IngestObserver>,
        config: IngestorConfig,
    ) -> Self {
        let index_manager = IndexManager::new(client.clone(), observer.clone());
        Self {
            client,
            observer,
            index_manager,
            config,
        }
    }

    pub fn config(&self) -> &IngestorConfig {
        &self.config
    }

    /// Write every document to `index`, then refresh it.
    ///
    /// # Returns
    ///
    /// * `Ok(IngestionReport)` - Totals for the run, including failed documents
    /// * `Err(PipelineError)` - The first source error or failed bulk request.
    ///   Batches written before it stay written
    #[instrument(skip(self, documents), fields(chunk_size = self.config.chunk_size))]
    pub async fn ingest<I>(&self, index: &str, documents: I) -> Result<IngestionReport, PipelineError>
    where
        I: IntoIterator<Item = Result<PreparedDocument, PipelineError>>,
    {
        self.config.validate()?;

        let started_at = Utc::now();
        let start = Instant::now();
        let mut totals = RunTotals::default();
        let mut failures = FailureBuffer::new(self.config.failure_capacity);
        let mut batch = Vec::with_capacity(self.config.chunk_size);

        for document in documents {
            batch.push(document?);
            if batch.len() >= self.config.chunk_size {
                self.submit(&batch, &mut totals, &mut failures).await?;
                batch.clear();
            }
        }

        if !batch.is_empty() {
            self.submit(&batch, &mut totals, &mut failures).await?;
        }

        let refreshed = self.index_manager.refresh(index).await;

        Ok(IngestionReport {
            index: index.to_string(),
            processed: totals.processed,
            succeeded: totals.succeeded,
            operations: totals.operations,
            started_at,
            elapsed: start.elapsed(),
            refreshed,
        })
    }

    async fn submit(
        &self,
        batch: &[PreparedDocument],
        totals: &mut RunTotals,
        failures: &mut FailureBuffer,
    ) -> Result<(), PipelineError> {
        debug!(count = batch.len(), "Submitting bulk batch");

        let mut outcomes = self.client.bulk_write(batch).await?;

        if outcomes.len() < batch.len() {
            self.observer.warn(&format!(
                "Bulk response held {} outcomes for {} documents",
                outcomes.len(),
                batch.len()
            ));
            let missing = batch[outcomes.len()..].iter().map(|doc| {
                BulkOutcome::failed(&doc.id, MISSING_OPERATION, "Missing from bulk response")
            });
            outcomes.extend(missing);
        }
        outcomes.truncate(batch.len());

        for outcome in outcomes {
            totals.record(outcome, failures);
        }
        totals.batches += 1;

        self.observer.progress(&totals.checkpoint());
        self.report_failures(failures.drain());

        Ok(())
    }

    fn report_failures(&self, drained: DrainedFailures) {
        for failure in &drained.failures {
            self.observer.error(&format!(
                "Failed to index document {}: {}",
                failure.id,
                failure.error.as_deref().unwrap_or("unknown error")
            ));
        }
        if drained.evicted > 0 {
            self.observer.error(&format!(
                "{} more document failures not shown",
                drained.evicted
            ));
        }
    }
}

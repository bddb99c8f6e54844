//! Orchestrator module for the bulk loader pipeline.
//!
//! Coordinates the source, preparer, index manager and ingestor for one
//! dataset.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, instrument};

use crate::dataset::DatasetSpec;
use crate::errors::PipelineError;
use crate::index_manager::IndexManager;
use crate::ingestor::{BulkIngestor, IngestorConfig};
use crate::observer::IngestObserver;
use crate::preparer::DocumentPreparer;
use crate::source::RecordSource;
use bulk_loader_repository::DestinationClient;
use bulk_loader_shared::IngestionReport;

/// Loads a dataset file into its destination index.
pub struct DatasetLoader {
    index_manager: IndexManager,
    ingestor: BulkIngestor,
}

impl DatasetLoader {
    pub fn new(
        client: Arc<dyn DestinationClient>,
        observer: Arc<dyn IngestObserver>,
        config: IngestorConfig,
    ) -> Self {
        Self {
            index_manager: IndexManager::new(client.clone(), observer.clone()),
            ingestor: BulkIngestor::with_config(client, observer, config),
        }
    }

    /// Run the whole load for `spec`.
    ///
    /// The input file is opened before the index is touched, so a missing
    /// file never deletes an existing index. The report's timing covers the
    /// whole run, index preparation included.
    #[instrument(skip(self, spec), fields(index = %spec.index(), path = %spec.input_path().display()))]
    pub async fn run(&self, spec: &DatasetSpec) -> Result<IngestionReport, PipelineError> {
        let started_at = Utc::now();
        let start = Instant::now();

        self.ingestor.config().validate()?;

        let source = RecordSource::open(spec.input_path(), spec.format())?;

        self.index_manager
            .ensure_index(spec.index(), spec.delete_index_first())
            .await?;

        let preparer = DocumentPreparer::from_spec(spec);
        let documents = source
            .zip(0u64..)
            .map(|(record, ordinal)| record.map(|record| preparer.prepare(record, ordinal)));

        let report = self.ingestor.ingest(spec.index(), documents).await?;

        info!(
            processed = report.processed,
            succeeded = report.succeeded,
            "Dataset loaded"
        );

        Ok(report.with_timing(started_at, start.elapsed()))
    }
}

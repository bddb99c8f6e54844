//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use bulk_loader_pipeline::{DatasetSpec, IngestorConfig, PipelineError};
use bulk_loader_repository::config::DEFAULT_HOST;
use bulk_loader_repository::DestinationConfig;
use bulk_loader_shared::RESERVED_ID_FIELD;

/// Load a CSV or newline-delimited JSON file into an OpenSearch index.
#[derive(Parser, Debug, Clone)]
#[command(name = "bulk-loader")]
#[command(about = "Load CSV or newline-delimited JSON files into OpenSearch", long_about = None)]
pub struct Cli {
    /// CSV (.csv) or newline-delimited JSON (.json, .log, .ndjson, .jsonl) file
    pub input_file: PathBuf,

    /// Index to load the documents into
    pub destination_index_name: String,

    /// OpenSearch host, with or without scheme
    #[arg(long, env = "OPENSEARCH_URL", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Field holding each document's unique id. The reserved _id field is
    /// always dropped from the document body
    #[arg(long, default_value = RESERVED_ID_FIELD)]
    pub id_field: String,

    /// First generated id for documents without an id field
    #[arg(long, default_value_t = 1)]
    pub id_start_from: u64,

    /// Delete the destination index before loading
    #[arg(long)]
    pub delete_index_first: bool,

    /// Documents per bulk request
    #[arg(long, default_value_t = 500)]
    pub chunk_size: usize,
}

impl Cli {
    /// Dataset described by the positional arguments and id options.
    pub fn dataset_spec(&self) -> Result<DatasetSpec, PipelineError> {
        Ok(
            DatasetSpec::new(&self.input_file, &self.destination_index_name)?
                .with_id_field(&self.id_field)
                .with_id_start_from(self.id_start_from)
                .with_delete_index_first(self.delete_index_first),
        )
    }

    pub fn destination_config(&self) -> DestinationConfig {
        DestinationConfig::new(&self.host)
    }

    pub fn ingestor_config(&self) -> IngestorConfig {
        IngestorConfig::default().with_chunk_size(self.chunk_size)
    }
}

//! Dataset configuration for a single load.

use std::path::{Path, PathBuf};

use bulk_loader_shared::{FileFormat, RESERVED_ID_FIELD};

use crate::errors::PipelineError;

/// Default first generated identity.
pub const DEFAULT_ID_START_FROM: u64 = 1;

/// Describes one file to load into one index.
///
/// The file format is derived from the input path when the spec is built and
/// cannot change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSpec {
    input_path: PathBuf,
    index: String,
    id_field: String,
    id_start_from: u64,
    delete_index_first: bool,
    format: FileFormat,
}

impl DatasetSpec {
    /// Create a spec with default identity settings.
    ///
    /// # Returns
    ///
    /// * `Ok(DatasetSpec)` - If the index name is usable and the extension is supported
    /// * `Err(PipelineError::UnsupportedFormat)` - If the extension is not `.csv` or an NDJSON extension
    /// * `Err(PipelineError::ConfigurationError)` - If the index name is empty
    pub fn new(input_path: impl Into<PathBuf>, index: impl Into<String>) -> Result<Self, PipelineError> {
        let input_path = input_path.into();
        let index = index.into();

        if index.trim().is_empty() {
            return Err(PipelineError::configuration("index name must not be empty"));
        }

        let format = FileFormat::from_path(&input_path).ok_or_else(|| {
            PipelineError::UnsupportedFormat {
                path: input_path.clone(),
            }
        })?;

        Ok(Self {
            input_path,
            index,
            id_field: RESERVED_ID_FIELD.to_string(),
            id_start_from: DEFAULT_ID_START_FROM,
            delete_index_first: false,
            format,
        })
    }

    /// Use `field` as the document identity when a record has it.
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// First identity assigned to records without an identity field.
    pub fn with_id_start_from(mut self, start: u64) -> Self {
        self.id_start_from = start;
        self
    }

    /// Delete the destination index before loading.
    pub fn with_delete_index_first(mut self, delete: bool) -> Self {
        self.delete_index_first = delete;
        self
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn id_start_from(&self) -> u64 {
        self.id_start_from
    }

    pub fn delete_index_first(&self) -> bool {
        self.delete_index_first
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }
}

//! Record sources for CSV and newline-delimited JSON files.
//!
//! Sources are lazy, forward-only iterators that hold one row or line in
//! memory at a time. Re-reading a file requires opening a new source.

mod csv;
mod ndjson;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::errors::PipelineError;
use bulk_loader_shared::{FileFormat, RawRecord};

pub use self::csv::CsvRecords;
pub use self::ndjson::NdjsonRecords;

enum Records {
    Csv(CsvRecords<File>),
    Ndjson(NdjsonRecords<BufReader<File>>),
}

/// Reads raw records from an input file in file order.
///
/// The file handle is owned by the source and closed when it is dropped.
/// After the first error the source yields nothing more.
pub struct RecordSource {
    records: Records,
    finished: bool,
}

impl RecordSource {
    /// Open `path` and read it as `format`.
    ///
    /// # Returns
    ///
    /// * `Ok(RecordSource)` - A source positioned at the first record
    /// * `Err(PipelineError::FileIo)` - If the file cannot be opened
    /// * `Err(PipelineError::ContentFormat)` - If the CSV header is unreadable or has duplicate columns
    pub fn open(path: &Path, format: FileFormat) -> Result<Self, PipelineError> {
        let file = File::open(path).map_err(|e| PipelineError::file_io(path, e))?;

        let records = match format {
            FileFormat::Csv => Records::Csv(CsvRecords::new(file, path)?),
            FileFormat::Ndjson => Records::Ndjson(NdjsonRecords::new(BufReader::new(file), path)),
        };

        debug!(path = %path.display(), format = %format, "Opened record source");

        Ok(Self {
            records,
            finished: false,
        })
    }
}

impl Iterator for RecordSource {
    type Item = Result<RawRecord, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = match &mut self.records {
            Records::Csv(records) => records.next(),
            Records::Ndjson(records) => records.next(),
        };

        if !matches!(item, Some(Ok(_))) {
            self.finished = true;
        }

        item
    }
}

//! CSV record reader.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ErrorKind, ReaderBuilder, StringRecord, StringRecordsIntoIter};
use serde_json::Value;

use crate::errors::PipelineError;
use bulk_loader_shared::RawRecord;

/// Reads CSV rows as records keyed by the header row.
///
/// Every row must have exactly as many fields as the header. Values are
/// kept as strings.
pub struct CsvRecords<R: Read> {
    headers: Vec<String>,
    rows: StringRecordsIntoIter<R>,
    path: PathBuf,
}

impl<R: Read> CsvRecords<R> {
    /// Read the header row from `reader`.
    ///
    /// `path` names the input in error messages.
    pub fn new(reader: R, path: &Path) -> Result<Self, PipelineError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| convert_error(e, path))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut seen = HashSet::with_capacity(headers.len());
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(PipelineError::content_format(
                    1,
                    format!("duplicate column {:?} in header", header),
                ));
            }
        }

        Ok(Self {
            headers,
            rows: reader.into_records(),
            path: path.to_path_buf(),
        })
    }

    /// Column names from the header row.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn to_record(&self, row: &StringRecord) -> RawRecord {
        self.headers
            .iter()
            .zip(row.iter())
            .map(|(name, value)| (name.clone(), Value::String(value.to_string())))
            .collect()
    }
}

impl<R: Read> Iterator for CsvRecords<R> {
    type Item = Result<RawRecord, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        Some(
            row.map(|row| self.to_record(&row))
                .map_err(|e| convert_error(e, &self.path)),
        )
    }
}

fn convert_error(err: csv::Error, path: &Path) -> PipelineError {
    let line = err.position().map(|pos| pos.line()).unwrap_or(0);

    match err.into_kind() {
        ErrorKind::Io(source) => PipelineError::file_io(path, source),
        ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => PipelineError::content_format(
            line,
            format!("expected {} fields, found {}", expected_len, len),
        ),
        ErrorKind::Utf8 { err, .. } => {
            PipelineError::content_format(line, format!("invalid UTF-8: {}", err))
        }
        other => PipelineError::content_format(line, format!("{:?}", other)),
    }
}

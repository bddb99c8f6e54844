//! Newline-delimited JSON record reader.

use std::io::{BufRead, ErrorKind, Lines};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::errors::PipelineError;
use bulk_loader_shared::RawRecord;

/// Reads one JSON object per line.
///
/// Blank lines are skipped. Line numbers in errors are 1-based and count
/// blank lines.
pub struct NdjsonRecords<R: BufRead> {
    lines: Lines<R>,
    line: u64,
    path: PathBuf,
}

impl<R: BufRead> NdjsonRecords<R> {
    pub fn new(reader: R, path: &Path) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
            path: path.to_path_buf(),
        }
    }

    fn parse(&self, text: &str) -> Result<RawRecord, PipelineError> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(record)) => Ok(record),
            Ok(other) => Err(PipelineError::content_format(
                self.line,
                format!("expected a JSON object, found {}", kind_of(&other)),
            )),
            Err(e) => Err(PipelineError::content_format(
                self.line,
                format!("invalid JSON: {}", e),
            )),
        }
    }
}

impl<R: BufRead> Iterator for NdjsonRecords<R> {
    type Item = Result<RawRecord, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = self.lines.next()?;
            self.line += 1;

            let text = match text {
                Ok(text) => text,
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    return Some(Err(PipelineError::content_format(
                        self.line,
                        "invalid UTF-8",
                    )));
                }
                Err(e) => return Some(Err(PipelineError::file_io(&self.path, e))),
            };

            if text.trim().is_empty() {
                continue;
            }

            return Some(self.parse(&text));
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

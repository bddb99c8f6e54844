//! Raw input records and the file formats they are read from.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One CSV row or one JSON line, keyed by field name.
///
/// Field names are case-sensitive and unique within a record.
pub type RawRecord = Map<String, Value>;

/// Input file formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Comma-delimited file with a header row.
    Csv,
    /// One JSON object per line.
    Ndjson,
}

impl FileFormat {
    /// Resolve the format from a file extension (without the leading dot).
    ///
    /// Matching is case-insensitive. `.json` and `.log` files are treated as
    /// newline-delimited JSON.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" | "log" | "ndjson" | "jsonl" => Some(Self::Ndjson),
            _ => None,
        }
    }

    /// Resolve the format from the extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// The tag used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Ndjson => "ndjson",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

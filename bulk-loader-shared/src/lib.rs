//! # Bulk Loader Shared
//!
//! Types shared by every bulk loader crate: the raw records read from input
//! files, the documents prepared for the index, per-document bulk outcomes and
//! the summary report of a run.

mod document;
mod record;
mod report;

pub use document::{BulkOutcome, PreparedDocument, RESERVED_ID_FIELD};
pub use record::{FileFormat, RawRecord};
pub use report::IngestionReport;

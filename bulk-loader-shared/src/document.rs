//! Documents submitted to the index and the outcome of each write.

use serde::{Deserialize, Serialize};

use crate::record::RawRecord;

/// Field name the destination store reserves for document identity.
///
/// It is carried as a bulk action parameter and never as a body field.
pub const RESERVED_ID_FIELD: &str = "_id";

/// A record ready for indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedDocument {
    /// Resolved document identity.
    pub id: String,
    /// Index the document is written to.
    pub index: String,
    /// Document body, without the reserved identity field.
    pub body: RawRecord,
}

/// Result of writing a single document within a bulk request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    /// Identity of the document the outcome belongs to.
    pub id: String,
    /// Operation the destination performed, e.g. `created` or `updated`.
    pub operation: String,
    /// Whether at least one shard acknowledged the write.
    pub success: bool,
    /// Failure reason reported by the destination.
    pub error: Option<String>,
}

impl BulkOutcome {
    /// An acknowledged write.
    pub fn succeeded(id: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            operation: operation.into(),
            success: true,
            error: None,
        }
    }

    /// A rejected write.
    pub fn failed(
        id: impl Into<String>,
        operation: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            operation: operation.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

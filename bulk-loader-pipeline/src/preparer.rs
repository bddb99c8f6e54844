//! Turns raw records into documents ready for a bulk write.

use serde_json::Value;

use crate::dataset::DatasetSpec;
use bulk_loader_shared::{PreparedDocument, RawRecord, RESERVED_ID_FIELD};

/// Resolves document identity and strips the reserved identity field.
#[derive(Debug, Clone)]
pub struct DocumentPreparer {
    index: String,
    id_field: String,
    id_start_from: u64,
}

impl DocumentPreparer {
    pub fn new(index: impl Into<String>, id_field: impl Into<String>, id_start_from: u64) -> Self {
        Self {
            index: index.into(),
            id_field: id_field.into(),
            id_start_from,
        }
    }

    pub fn from_spec(spec: &DatasetSpec) -> Self {
        Self::new(spec.index(), spec.id_field(), spec.id_start_from())
    }

    /// Prepare the record at 0-based position `ordinal` in the input.
    ///
    /// A non-null, non-empty value in the identity field is used verbatim.
    /// Otherwise the identity is `ordinal + id_start_from`. The reserved `_id` field never
    /// appears in the body.
    pub fn prepare(&self, mut record: RawRecord, ordinal: u64) -> PreparedDocument {
        let id = match record.get(&self.id_field) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::String(_)) | Some(Value::Null) | None => {
                ordinal.saturating_add(self.id_start_from).to_string()
            }
            Some(other) => other.to_string(),
        };

        record.remove(RESERVED_ID_FIELD);

        PreparedDocument {
            id,
            index: self.index.clone(),
            body: record,
        }
    }
}

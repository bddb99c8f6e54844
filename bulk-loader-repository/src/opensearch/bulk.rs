//! Bulk request bodies and per-item response parsing.

use opensearch::http::request::JsonBody;
use serde_json::{json, Value};

use bulk_loader_shared::{BulkOutcome, PreparedDocument};

/// Action used for every document; replaces an existing document with the same id.
pub(crate) const BULK_ACTION: &str = "index";

/// Build the NDJSON body of a bulk request.
pub(crate) fn build_bulk_body(documents: &[PreparedDocument]) -> Vec<JsonBody<Value>> {
    bulk_lines(documents).into_iter().map(JsonBody::from).collect()
}

/// One action line and one source line per document.
fn bulk_lines(documents: &[PreparedDocument]) -> Vec<Value> {
    let mut lines = Vec::with_capacity(documents.len() * 2);

    for doc in documents {
        lines.push(json!({ BULK_ACTION: { "_index": doc.index, "_id": doc.id } }));
        lines.push(Value::Object(doc.body.clone()));
    }

    lines
}

/// Map the `items` of a bulk response to outcomes, in request order.
///
/// A write counts as successful when the item carries no error and at least
/// one shard acknowledged it. Items beyond the number of documents are ignored;
/// missing items are left to the caller.
pub(crate) fn parse_bulk_items(documents: &[PreparedDocument], response: &Value) -> Vec<BulkOutcome> {
    let empty = Vec::new();
    let items = response
        .get("items")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    documents
        .iter()
        .zip(items.iter())
        .map(|(doc, item)| parse_item(doc, item))
        .collect()
}

fn parse_item(doc: &PreparedDocument, item: &Value) -> BulkOutcome {
    // Each item is a single-key object: { "<action>": { ...result } }
    let (action, result) = match item.as_object().and_then(|obj| obj.iter().next()) {
        Some((action, result)) => (action.as_str(), result),
        None => {
            return BulkOutcome::failed(&doc.id, BULK_ACTION, "Malformed bulk response item");
        }
    };

    let id = result
        .get("_id")
        .and_then(Value::as_str)
        .unwrap_or(&doc.id)
        .to_string();

    let operation = result
        .get("result")
        .and_then(Value::as_str)
        .unwrap_or(action)
        .to_string();

    if let Some(error) = result.get("error") {
        return BulkOutcome::failed(id, operation, error_reason(error));
    }

    let acknowledged = match result
        .get("_shards")
        .and_then(|shards| shards.get("successful"))
        .and_then(Value::as_u64)
    {
        Some(successful) => successful > 0,
        None => result
            .get("status")
            .and_then(Value::as_u64)
            .map(|status| (200..300).contains(&status))
            .unwrap_or(false),
    };

    if acknowledged {
        BulkOutcome::succeeded(id, operation)
    } else {
        BulkOutcome::failed(id, operation, "No shard acknowledged the write")
    }
}

/// Render an item error as `type: reason`.
pub(crate) fn error_reason(error: &Value) -> String {
    match error {
        Value::String(reason) => reason.clone(),
        Value::Object(obj) => {
            let kind = obj.get("type").and_then(Value::as_str);
            let reason = obj.get("reason").and_then(Value::as_str);
            match (kind, reason) {
                (Some(kind), Some(reason)) => format!("{}: {}", kind, reason),
                (Some(kind), None) => kind.to_string(),
                (None, Some(reason)) => reason.to_string(),
                (None, None) => error.to_string(),
            }
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn doc(id: &str) -> PreparedDocument {
        let mut body = Map::new();
        body.insert("name".to_string(), json!(format!("doc {}", id)));
        PreparedDocument {
            id: id.to_string(),
            index: "people".to_string(),
            body,
        }
    }

    #[test]
    fn test_build_bulk_body() {
        let body = build_bulk_body(&[doc("1"), doc("2")]);
        assert_eq!(body.len(), 4);
    }

    #[test]
    fn test_bulk_lines_pair_action_and_source() {
        let lines = bulk_lines(&[doc("1"), doc("2")]);

        assert_eq!(lines[0], json!({ "index": { "_index": "people", "_id": "1" } }));
        assert_eq!(lines[1].to_string(), r#"{"name":"doc 1"}"#);
        assert_eq!(lines[2]["index"]["_id"], "2");
        assert_eq!(lines[3], json!({ "name": "doc 2" }));
        assert!(lines[1].get("_id").is_none());
        assert!(lines[3].get("_id").is_none());
    }

    #[test]
    fn test_parse_created_and_updated() {
        let docs = vec![doc("1"), doc("2")];
        let response = json!({
            "took": 3,
            "errors": false,
            "items": [
                { "index": { "_id": "1", "result": "created", "status": 201, "_shards": { "total": 2, "successful": 1, "failed": 0 } } },
                { "index": { "_id": "2", "result": "updated", "status": 200, "_shards": { "total": 2, "successful": 2, "failed": 0 } } }
            ]
        });

        let outcomes = parse_bulk_items(&docs, &response);

        assert_eq!(
            outcomes,
            vec![
                BulkOutcome::succeeded("1", "created"),
                BulkOutcome::succeeded("2", "updated"),
            ]
        );
    }

    #[test]
    fn test_parse_item_error() {
        let docs = vec![doc("1")];
        let response = json!({
            "errors": true,
            "items": [
                { "index": { "_id": "1", "status": 400, "error": { "type": "mapper_parsing_exception", "reason": "failed to parse field [age]" } } }
            ]
        });

        let outcomes = parse_bulk_items(&docs, &response);

        assert_eq!(outcomes.len(), 1);
        assert!(!outcomes[0].success);
        assert_eq!(outcomes[0].operation, "index");
        assert_eq!(
            outcomes[0].error.as_deref(),
            Some("mapper_parsing_exception: failed to parse field [age]")
        );
    }

    #[test]
    fn test_parse_zero_successful_shards() {
        let docs = vec![doc("1")];
        let response = json!({
            "items": [
                { "index": { "_id": "1", "result": "created", "status": 201, "_shards": { "total": 2, "successful": 0, "failed": 2 } } }
            ]
        });

        let outcomes = parse_bulk_items(&docs, &response);
        assert!(!outcomes[0].success);
    }

    #[test]
    fn test_parse_missing_items() {
        let docs = vec![doc("1"), doc("2")];
        let response = json!({
            "items": [
                { "index": { "_id": "1", "result": "created", "_shards": { "successful": 1 } } }
            ]
        });

        let outcomes = parse_bulk_items(&docs, &response);
        assert_eq!(outcomes.len(), 1);

        let outcomes = parse_bulk_items(&docs, &json!({}));
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_parse_malformed_item_falls_back_to_request_id() {
        let docs = vec![doc("7")];
        let outcomes = parse_bulk_items(&docs, &json!({ "items": ["oops"] }));
        assert_eq!(outcomes[0].id, "7");
        assert!(!outcomes[0].success);
    }

    #[test]
    fn test_error_reason() {
        assert_eq!(error_reason(&json!("boom")), "boom");
        assert_eq!(
            error_reason(&json!({ "type": "version_conflict_engine_exception" })),
            "version_conflict_engine_exception"
        );
    }
}

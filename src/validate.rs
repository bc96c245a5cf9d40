//! Request Validation
//!
//! Shape and type checks for descriptors and payloads. Every check here runs
//! before the cache or the store is touched.
//!
//! Raw checks take untyped JSON (as received over the wire) and produce typed
//! descriptors. The `check_*` functions re-validate typed descriptors handed
//! directly to the service.

use serde_json::{Map, Value};

use crate::error::{DocCacheError, Result};
use crate::models::{Document, DocumentDescriptor, Filters, QueryDescriptor};

// == Raw Descriptors ==
/// Validates an untyped `{collection, id}` object.
pub fn document_descriptor(raw: &Value) -> Result<DocumentDescriptor> {
    let object = as_object(raw, "descriptor")?;
    let descriptor = DocumentDescriptor {
        collection: required_string(object, "collection")?,
        id: required_string(object, "id")?,
    };
    check_document(&descriptor)?;
    Ok(descriptor)
}

/// Validates an untyped `{collection, limit?, filters?}` object.
pub fn query_descriptor(raw: &Value) -> Result<(QueryDescriptor, Filters)> {
    let object = as_object(raw, "query")?;

    let collection = required_string(object, "collection")?;
    let limit = match object.get("limit") {
        None | Some(Value::Null) => None,
        Some(value) => Some(positive_integer(value, "limit")?),
    };
    let filters = match object.get("filters") {
        None | Some(Value::Null) => Filters::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(other) => {
            return Err(type_mismatch("filters", "an object", other));
        }
    };

    let query = QueryDescriptor { collection, limit };
    check_query(&query)?;
    Ok((query, filters))
}

/// Validates a document or partial-document payload.
pub fn payload(raw: Option<&Value>) -> Result<Document> {
    match raw {
        None | Some(Value::Null) => Err(DocCacheError::validation(
            "missing required field 'document'",
        )),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(other) => Err(type_mismatch("document", "an object", other)),
    }
}

// == Typed Descriptors ==
/// Checks a typed document descriptor.
pub fn check_document(descriptor: &DocumentDescriptor) -> Result<()> {
    non_empty(&descriptor.collection, "collection")?;
    non_empty(&descriptor.id, "id")
}

/// Checks a typed query descriptor.
pub fn check_query(query: &QueryDescriptor) -> Result<()> {
    non_empty(&query.collection, "collection")?;
    if query.limit == Some(0) {
        return Err(DocCacheError::validation(
            "expected 'limit' to be a positive integer, got 0",
        ));
    }
    Ok(())
}

// == Helpers ==
fn as_object<'a>(raw: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    match raw {
        Value::Object(map) => Ok(map),
        other => Err(type_mismatch(what, "an object", other)),
    }
}

fn required_string(object: &Map<String, Value>, field: &str) -> Result<String> {
    match object.get(field) {
        None | Some(Value::Null) => Err(DocCacheError::validation(format!(
            "missing required field '{}'",
            field
        ))),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(type_mismatch(field, "a string", other)),
    }
}

fn positive_integer(value: &Value, field: &str) -> Result<u64> {
    match value.as_u64() {
        Some(n) if n > 0 => Ok(n),
        _ => Err(DocCacheError::validation(format!(
            "expected '{}' to be a positive integer, got {}",
            field, value
        ))),
    }
}

fn non_empty(value: &str, field: &str) -> Result<()> {
    if value.is_empty() {
        Err(DocCacheError::validation(format!(
            "'{}' cannot be empty",
            field
        )))
    } else {
        Ok(())
    }
}

fn type_mismatch(field: &str, expected: &str, actual: &Value) -> DocCacheError {
    DocCacheError::validation(format!(
        "expected '{}' to be {}, got {}",
        field,
        expected,
        json_type(actual)
    ))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

//! Request DTOs for the document cache API
//!
//! Bodies are kept as untyped JSON so that type errors surface as
//! validation errors naming the offending field instead of generic
//! deserialization failures.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::models::{Document, DocumentDescriptor, Filters, QueryDescriptor};
use crate::validate;

/// Request body for create (PUT /documents) and update (PATCH /documents)
///
/// Expected shape: `{"collection": "...", "id": "...", "document": {...}}`,
/// where `document` is the full document (create) or the partial payload
/// (update). Any JSON value is accepted here so that a non-object body is
/// reported by the validator rather than by the extractor.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct WriteRequest(pub Value);

impl WriteRequest {
    /// Validates the descriptor and the payload.
    pub fn validate(&self) -> Result<(DocumentDescriptor, Document)> {
        let descriptor = validate::document_descriptor(&self.0)?;
        let document = validate::payload(self.0.get("document"))?;
        Ok((descriptor, document))
    }
}

/// Request body for read-many (POST /documents/query)
///
/// Expected shape: `{"collection": "...", "limit": 2, "filters": {...}}`.
/// Filter order in the body is preserved and is part of the cache key.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct QueryRequest(pub Value);

impl QueryRequest {
    /// Validates the query descriptor and its filters.
    pub fn validate(&self) -> Result<(QueryDescriptor, Filters)> {
        validate::query_descriptor(&self.0)
    }
}

//! Document and descriptor types shared by the cache, the store and the API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An opaque document: any JSON object, field order preserved.
pub type Document = Map<String, Value>;

/// Equality filters for a query, applied and keyed in insertion order.
pub type Filters = Map<String, Value>;

// == Document Descriptor ==
/// Addresses exactly one document in one collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    pub collection: String,
    pub id: String,
}

impl DocumentDescriptor {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

// == Query Descriptor ==
/// Addresses a filtered, optionally limited set of documents in one collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub collection: String,
    /// Maximum number of documents to return, `None` for no limit
    #[serde(default)]
    pub limit: Option<u64>,
}

impl QueryDescriptor {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

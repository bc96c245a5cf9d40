//! Document types and the request/response models of the HTTP API
//!
//! `document` holds the domain types shared by every layer; `requests` and
//! `responses` are the DTOs serialized over the wire.

pub mod document;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use document::{Document, DocumentDescriptor, Filters, QueryDescriptor};
pub use requests::{QueryRequest, WriteRequest};
pub use responses::{
    ClearResponse, DocumentResponse, ErrorResponse, HealthResponse, QueryResponse, StatsResponse,
    WriteResponse,
};

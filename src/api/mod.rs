//! API Module
//!
//! HTTP handlers and routing for the document cache REST API.
//!
//! # Endpoints
//! - `PUT /documents` - Create a document
//! - `PATCH /documents` - Update a document
//! - `GET /documents/:collection/:id` - Read one document
//! - `POST /documents/query` - Read many documents
//! - `DELETE /cache` - Clear the cache
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;

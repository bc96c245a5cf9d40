//! Cache Key Derivation
//!
//! Builds deterministic cache keys for single-document lookups and for
//! filtered, limited queries.
//!
//! # Key Formats
//! - Document: `<collection>:<id>`
//! - Query: `<collection>::<limit>` followed by `-<field>:<value>` per filter
//!
//! The limit renders as `0` when unspecified. Filter values render as compact
//! JSON so that `"1"` and `1` stay distinct. Every component is escaped so the
//! separators never appear inside one, which keeps document and query keys
//! collision-free for any input.
//!
//! Filters are keyed in iteration order: the same filters supplied in a
//! different order produce a different key.

use serde_json::Value;

use crate::models::{DocumentDescriptor, Filters, QueryDescriptor};

/// Separator between the parts of a key.
pub const KEY_SEPARATOR: char = ':';

/// Prefix of every filter segment in a query key.
pub const FILTER_PREFIX: char = '-';

// == Document Key ==
/// Derives the cache key of a single document.
pub fn document_key(descriptor: &DocumentDescriptor) -> String {
    format!(
        "{}{}{}",
        escape(&descriptor.collection),
        KEY_SEPARATOR,
        escape(&descriptor.id)
    )
}

// == Query Key ==
/// Derives the cache key of a filtered query.
pub fn query_key(query: &QueryDescriptor, filters: &Filters) -> String {
    let mut key = format!(
        "{}{}{}{}",
        escape(&query.collection),
        KEY_SEPARATOR,
        KEY_SEPARATOR,
        query.limit.unwrap_or(0)
    );

    for (field, value) in filters {
        key.push(FILTER_PREFIX);
        key.push_str(&escape(field));
        key.push(KEY_SEPARATOR);
        key.push_str(&escape(&render_value(value)));
    }

    key
}

fn render_value(value: &Value) -> String {
    // Display for Value is compact JSON and cannot fail
    value.to_string()
}

/// Percent-escapes the characters that carry meaning inside a key.
fn escape(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for c in component.chars() {
        match c {
            '%' => out.push_str("%25"),
            ':' => out.push_str("%3A"),
            '-' => out.push_str("%2D"),
            _ => out.push(c),
        }
    }
    out
}

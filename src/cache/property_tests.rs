//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check key derivation, budget enforcement and the
//! read-through behavior of the document service.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::{document_key, query_key, CacheStore};
use crate::models::{Document, DocumentDescriptor, Filters, QueryDescriptor};
use crate::service::DocumentService;
use crate::store::MemoryDocumentStore;

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates collection names and ids, including separator characters
fn component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9:%-]{1,16}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,256}"
}

fn filter_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9:-]{0,8}".prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

fn filters_strategy() -> impl Strategy<Value = Filters> {
    prop::collection::vec(("[a-z:-]{1,8}", filter_value_strategy()), 0..4)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Equal descriptors always derive the same key.
    #[test]
    fn prop_document_key_is_deterministic(
        collection in component_strategy(),
        id in component_strategy()
    ) {
        let a = DocumentDescriptor::new(collection.clone(), id.clone());
        let b = DocumentDescriptor::new(collection, id);
        prop_assert_eq!(document_key(&a), document_key(&b));
    }

    // Distinct (collection, id) pairs never share a key, whatever characters
    // they contain.
    #[test]
    fn prop_document_keys_are_collision_free(
        pairs in prop::collection::vec((component_strategy(), component_strategy()), 1..30)
    ) {
        let unique: HashSet<(String, String)> = pairs.into_iter().collect();
        let keys: HashSet<String> = unique
            .iter()
            .map(|(c, i)| document_key(&DocumentDescriptor::new(c.clone(), i.clone())))
            .collect();
        prop_assert_eq!(keys.len(), unique.len());
    }

    // Same collection, limit and filters in the same order derive one key.
    #[test]
    fn prop_query_key_is_deterministic(
        collection in component_strategy(),
        limit in prop::option::of(1u64..1000),
        filters in filters_strategy()
    ) {
        let query = QueryDescriptor { collection, limit };
        prop_assert_eq!(query_key(&query, &filters), query_key(&query, &filters.clone()));
    }

    // Query keys and document keys live in disjoint namespaces.
    #[test]
    fn prop_query_key_never_equals_document_key(
        collection in component_strategy(),
        id in component_strategy(),
        limit in prop::option::of(1u64..1000),
        filters in filters_strategy()
    ) {
        let query = QueryDescriptor { collection: collection.clone(), limit };
        let document = DocumentDescriptor::new(collection, id);
        prop_assert_ne!(query_key(&query, &filters), document_key(&document));
    }

    // Storing a value and reading it back before expiry returns it unchanged.
    #[test]
    fn prop_roundtrip_storage(key in component_strategy(), value in value_strategy()) {
        let mut store = CacheStore::new(1);

        store.put(key.clone(), value.clone(), TEST_TTL);

        prop_assert_eq!(store.get(&key), Some(value));
    }

    // The latest put for a key wins and never creates a second entry.
    #[test]
    fn prop_overwrite_semantics(
        key in component_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = CacheStore::new(1);

        store.put(key.clone(), value1, TEST_TTL);
        store.put(key.clone(), value2.clone(), TEST_TTL);

        prop_assert_eq!(store.get(&key), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // Before each put, a store measuring over budget is flushed; the entry
    // just written is always retrievable.
    #[test]
    fn prop_budget_flush_keeps_new_entry(
        budget in 64u64..2048,
        entries in prop::collection::vec((component_strategy(), value_strategy()), 1..60)
    ) {
        let mut store = CacheStore::with_byte_budget(budget);

        for (key, value) in entries {
            let over_budget = store.size_bytes() > budget;
            let flushes_before = store.stats().flushes;
            let len_before = store.len();
            let existed = store.get(&key).is_some();

            store.put(key.clone(), value.clone(), TEST_TTL);

            if over_budget {
                prop_assert_eq!(store.stats().flushes, flushes_before + 1);
                prop_assert_eq!(store.len(), 1);
            } else {
                prop_assert_eq!(store.stats().flushes, flushes_before);
                let expected = if existed { len_before } else { len_before + 1 };
                prop_assert_eq!(store.len(), expected);
            }
            prop_assert_eq!(store.get(&key), Some(value));
        }
    }

    // Any number of repeated reads of a created document reach the store
    // zero times.
    #[test]
    fn prop_created_documents_are_served_from_cache(
        collection in component_strategy(),
        id in component_strategy(),
        title in value_strategy(),
        reads in 1usize..5
    ) {
        let store = Arc::new(MemoryDocumentStore::new());
        let service = DocumentService::new(
            store.clone(),
            Arc::new(RwLock::new(CacheStore::new(1))),
            TEST_TTL,
        );
        let descriptor = DocumentDescriptor::new(collection, id);
        let mut document = Document::new();
        document.insert("title".to_string(), Value::from(title));

        tokio_test::block_on(service.create(&descriptor, document.clone())).unwrap();
        for _ in 0..reads {
            let found = tokio_test::block_on(service.read_one(&descriptor)).unwrap();
            prop_assert_eq!(&found, &document);
        }
        prop_assert_eq!(store.calls().get, 0);
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // After the TTL elapses an entry is never returned, even without a sweep.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in component_strategy(),
        value in value_strategy()
    ) {
        let mut store = CacheStore::new(1);

        store.put(key.clone(), value.clone(), Duration::from_millis(50));
        prop_assert_eq!(store.get(&key), Some(value));

        std::thread::sleep(Duration::from_millis(80));

        prop_assert!(store.get(&key).is_none(), "Entry should not be found after TTL expires");
    }
}

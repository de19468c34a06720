//! Macro-generated contract suite for `CollectionSource<JsonRecord>`
//!
//! Every implementation (in-memory, REST over HTTP) must behave the same
//! way for the verbs the screens rely on.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod source_harness;
//!
//! async fn setup(seed: Vec<Value>) -> (InMemoryCollection<JsonRecord>, ()) { ... }
//!
//! collection_source_tests!(setup);
//! ```
//!
//! `$setup` receives the seed records and returns the source plus a guard
//! that must stay alive for the duration of the test (e.g. the fake backend).
//!
//! # Generated Tests
//!
//! - `test_list_keeps_backend_order`
//! - `test_get_existing_and_missing`
//! - `test_create_assigns_id`
//! - `test_update_merges_fields`
//! - `test_remove_existing_and_missing`
//! - `test_toggle_status_echoes_record`

#![allow(dead_code)]

use serde_json::{Value, json};

pub fn seed_records() -> Vec<Value> {
    vec![
        json!({"_id": "w1", "name": "Zeta", "isActive": true, "price": 10}),
        json!({"_id": "w2", "name": "alpha", "isActive": false, "price": 2.5}),
        json!({"_id": "w3", "name": "Mid", "isActive": true}),
    ]
}

#[macro_export]
macro_rules! collection_source_tests {
    ($setup:path) => {
        mod collection_source_contract_tests {
            use super::*;
            use serde_json::json;
            use storefront::client::{ActionMethod, CollectionSource};
            use storefront::core::{JsonRecord, Record, RecordId};

            fn names(records: &[JsonRecord]) -> Vec<String> {
                records
                    .iter()
                    .map(|r| r.get("name").and_then(|v| v.as_str()).unwrap_or("").to_string())
                    .collect()
            }

            #[tokio::test]
            async fn test_list_keeps_backend_order() {
                let (source, _guard) = $setup(source_harness::seed_records()).await;
                let records = source.list().await.unwrap();
                assert_eq!(names(&records), vec!["Zeta", "alpha", "Mid"]);
            }

            #[tokio::test]
            async fn test_get_existing_and_missing() {
                let (source, _guard) = $setup(source_harness::seed_records()).await;
                let record = source.get(&RecordId::from("w2")).await.unwrap();
                assert_eq!(record.get("name"), Some(&json!("alpha")));
                assert!(source.get(&RecordId::from("nope")).await.is_err());
            }

            #[tokio::test]
            async fn test_create_assigns_id() {
                let (source, _guard) = $setup(source_harness::seed_records()).await;
                let created = source
                    .create(&json!({"name": "Fresh", "isActive": true}))
                    .await
                    .unwrap()
                    .unwrap();
                assert!(!created.id().is_empty());
                assert_eq!(created.get("name"), Some(&json!("Fresh")));

                let records = source.list().await.unwrap();
                assert_eq!(records.len(), 4);
                assert!(records.iter().any(|r| r.id() == created.id()));
            }

            #[tokio::test]
            async fn test_update_merges_fields() {
                let (source, _guard) = $setup(source_harness::seed_records()).await;
                let updated = source
                    .update(&RecordId::from("w1"), &json!({"name": "Zed"}))
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(updated.id(), RecordId::from("w1"));
                assert_eq!(updated.get("name"), Some(&json!("Zed")));
                assert_eq!(updated.get("price"), Some(&json!(10)));

                assert!(source
                    .update(&RecordId::from("nope"), &json!({"name": "x"}))
                    .await
                    .is_err());
            }

            #[tokio::test]
            async fn test_remove_existing_and_missing() {
                let (source, _guard) = $setup(source_harness::seed_records()).await;
                let removed = source.remove(&RecordId::from("w2")).await.unwrap();
                assert_eq!(removed, RecordId::from("w2"));

                let records = source.list().await.unwrap();
                assert_eq!(names(&records), vec!["Zeta", "Mid"]);
                assert!(source.remove(&RecordId::from("w2")).await.is_err());
            }

            #[tokio::test]
            async fn test_toggle_status_echoes_record() {
                let (source, _guard) = $setup(source_harness::seed_records()).await;
                let echoed = source
                    .action(ActionMethod::Patch, &RecordId::from("w2"), "toggle-status", None)
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(echoed.get("isActive"), Some(&json!(true)));

                let record = source.get(&RecordId::from("w2")).await.unwrap();
                assert_eq!(record.get("isActive"), Some(&json!(true)));
            }
        }
    };
}

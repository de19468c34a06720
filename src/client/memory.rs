//! In-memory implementation of CollectionSource for testing and offline use

use crate::client::{ActionMethod, CollectionSource};
use crate::core::error::AdminError;
use crate::core::record::{Record, RecordId};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use uuid::Uuid;

/// In-memory collection keeping insertion order
///
/// Behaves like a backend that assigns `_id`s and `createdAt` stamps and
/// echoes the stored record on every write. Failures can be scripted with
/// [`InMemoryCollection::fail_next`]. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryCollection<T> {
    records: Arc<RwLock<IndexMap<RecordId, T>>>,
    failures: Arc<Mutex<VecDeque<Option<AdminError>>>>,
    requests: Arc<AtomicUsize>,
}

impl<T: Record> InMemoryCollection<T> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
            failures: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a collection seeded with records
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let collection = Self::new();
        if let Ok(mut map) = collection.records.write() {
            for record in records {
                map.insert(record.id(), record);
            }
        }
        collection
    }

    /// Make the next request fail with `error`
    pub fn fail_next(&self, error: AdminError) {
        self.fail_after(0, error);
    }

    /// Let `successes` requests through, then fail the one after with `error`
    pub fn fail_after(&self, successes: usize, error: AdminError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.extend(std::iter::repeat_with(|| None).take(successes));
            failures.push_back(Some(error));
        }
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Stored records, in insertion order
    pub fn records(&self) -> Vec<T> {
        self.records
            .read()
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default()
    }

    fn begin_request(&self) -> Result<(), AdminError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let mut failures = self
            .failures
            .lock()
            .map_err(|e| AdminError::Internal(format!("Failed to acquire failure lock: {}", e)))?;
        match failures.pop_front().flatten() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, IndexMap<RecordId, T>>, AdminError> {
        self.records
            .read()
            .map_err(|e| AdminError::Internal(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, IndexMap<RecordId, T>>, AdminError> {
        self.records
            .write()
            .map_err(|e| AdminError::Internal(format!("Failed to acquire write lock: {}", e)))
    }

    fn not_found(id: &RecordId) -> AdminError {
        AdminError::NotFound {
            resource: T::resource_name().to_string(),
            id: id.to_string(),
        }
    }

    fn merge(record: &T, payload: &Value) -> Result<T, AdminError> {
        let mut current = serde_json::to_value(record)?;
        if let (Some(target), Some(changes)) = (current.as_object_mut(), payload.as_object()) {
            for (key, value) in changes {
                if key != "_id" {
                    target.insert(key.clone(), value.clone());
                }
            }
        }
        Ok(serde_json::from_value(current)?)
    }
}

impl<T: Record> Default for InMemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> CollectionSource<T> for InMemoryCollection<T> {
    async fn list(&self) -> Result<Vec<T>, AdminError> {
        self.begin_request()?;
        Ok(self.read()?.values().cloned().collect())
    }

    async fn get(&self, id: &RecordId) -> Result<T, AdminError> {
        self.begin_request()?;
        self.read()?
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, payload: &Value) -> Result<Option<T>, AdminError> {
        self.begin_request()?;

        let mut object = payload.as_object().cloned().unwrap_or_else(Map::new);
        object.insert("_id".to_string(), Value::String(Uuid::new_v4().simple().to_string()));
        object
            .entry("createdAt")
            .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));

        let record: T = serde_json::from_value(Value::Object(object))?;
        self.write()?.insert(record.id(), record.clone());
        Ok(Some(record))
    }

    async fn update(&self, id: &RecordId, payload: &Value) -> Result<Option<T>, AdminError> {
        self.begin_request()?;

        let mut records = self.write()?;
        let existing = records.get(id).ok_or_else(|| Self::not_found(id))?;
        let updated = Self::merge(existing, payload)?;
        records.insert(id.clone(), updated.clone());
        Ok(Some(updated))
    }

    async fn remove(&self, id: &RecordId) -> Result<RecordId, AdminError> {
        self.begin_request()?;

        self.write()?
            .shift_remove(id)
            .map(|_| id.clone())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn action(
        &self,
        _method: ActionMethod,
        id: &RecordId,
        verb: &str,
        payload: Option<&Value>,
    ) -> Result<Option<T>, AdminError> {
        self.begin_request()?;

        let mut records = self.write()?;
        let existing = records.get(id).ok_or_else(|| Self::not_found(id))?;

        let changes = match verb {
            "toggle-status" => {
                let current = serde_json::to_value(existing)?;
                let active = current
                    .get("isActive")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                serde_json::json!({ "isActive": !active })
            }
            _ => payload.cloned().unwrap_or(Value::Null),
        };

        let updated = Self::merge(existing, &changes)?;
        records.insert(id.clone(), updated.clone());
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::JsonRecord;
    use serde_json::json;

    fn record(value: Value) -> JsonRecord {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_timestamp() {
        let collection = InMemoryCollection::<JsonRecord>::new();
        let created = collection
            .create(&json!({"name": "Trending"}))
            .await
            .unwrap()
            .unwrap();

        assert!(!created.id().is_empty());
        assert!(created.get("createdAt").is_some());
        assert_eq!(collection.records().len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let collection =
            InMemoryCollection::with_records([record(json!({"_id": "1", "name": "Old", "n": 1}))]);

        let updated = collection
            .update(&RecordId::from("1"), &json!({"name": "New", "_id": "hijack"}))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.get("name"), Some(&json!("New")));
        assert_eq!(updated.get("n"), Some(&json!(1)));
        assert_eq!(updated.id(), RecordId::from("1"));
    }

    #[tokio::test]
    async fn test_toggle_status_flips_flag() {
        let collection =
            InMemoryCollection::with_records([record(json!({"_id": "c1", "isActive": true}))]);

        let toggled = collection
            .action(ActionMethod::Patch, &RecordId::from("c1"), "toggle-status", None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(toggled.get("isActive"), Some(&json!(false)));
    }

    #[tokio::test]
    async fn test_remove_keeps_order_of_others() {
        let collection = InMemoryCollection::with_records([
            record(json!({"_id": "a"})),
            record(json!({"_id": "b"})),
            record(json!({"_id": "c"})),
        ]);

        collection.remove(&RecordId::from("b")).await.unwrap();
        let ids: Vec<_> = collection.records().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![RecordId::from("a"), RecordId::from("c")]);

        let err = collection.remove(&RecordId::from("b")).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_scripted_failure_and_request_count() {
        let collection = InMemoryCollection::<JsonRecord>::new();
        collection.fail_next(AdminError::network("memory", "offline"));

        assert!(collection.list().await.is_err());
        assert!(collection.list().await.is_ok());
        assert_eq!(collection.request_count(), 2);
    }
}

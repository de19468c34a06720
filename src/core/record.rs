//! Record traits defining the core abstraction for every collection

use crate::core::field::{FieldValue, ToFieldValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Server-assigned opaque identifier
///
/// Backends hand out Mongo-style string ids (`_id`) and, for older
/// fixtures, plain numbers. Both deserialize into a `RecordId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(RecordId(s)),
            Value::Number(n) => Ok(RecordId(n.to_string())),
            Value::Null => Ok(RecordId::default()),
            other => Err(serde::de::Error::custom(format!(
                "expected string or number id, got {}",
                other
            ))),
        }
    }
}

impl ToFieldValue for RecordId {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.0.clone())
    }
}

/// Base trait for every record a screen lists.
///
/// A record is a flat mapping of field names to values plus nested lists for
/// sub-resources. The only client-side invariant is that [`Record::id`] is
/// unique within a snapshot.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The REST resource segment under `/api` (e.g. "products", "categories")
    fn resource_name() -> &'static str;

    /// Fields searched by default by a list view
    fn search_fields() -> &'static [&'static str];

    /// Get the unique identifier for this record
    fn id(&self) -> RecordId;

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

/// A schemaless record backed by a JSON object
///
/// Useful for resources without a typed model; pass the searchable fields to
/// the list view explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonRecord(pub Map<String, Value>);

impl JsonRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl Record for JsonRecord {
    fn resource_name() -> &'static str {
        "records"
    }

    fn search_fields() -> &'static [&'static str] {
        &["name"]
    }

    fn id(&self) -> RecordId {
        self.0
            .get("_id")
            .or_else(|| self.0.get("id"))
            .and_then(|v| match v {
                Value::String(s) => Some(RecordId::new(s.clone())),
                Value::Number(n) => Some(RecordId::new(n.to_string())),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        self.0.get(field).map(FieldValue::from_json)
    }
}

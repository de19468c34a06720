//! Remote collection clients
//!
//! [`CollectionSource`] is the seam between screens and the backend. The
//! reqwest-backed [`RestCollection`] talks to the real REST API; the
//! [`InMemoryCollection`] serves tests and offline demos.

pub mod envelope;
pub mod memory;
pub mod rest;
pub mod transport;

pub use memory::InMemoryCollection;
pub use rest::RestCollection;
pub use transport::ApiClient;

use crate::core::error::AdminError;
use crate::core::record::{Record, RecordId};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// HTTP verb of a resource-specific sub-route such as `/{id}/toggle-status`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMethod {
    Put,
    Patch,
}

impl fmt::Display for ActionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionMethod::Put => f.write_str("PUT"),
            ActionMethod::Patch => f.write_str("PATCH"),
        }
    }
}

/// Read/write access to one REST resource
///
/// Implementations never retry and never cache: every call hits the
/// collection and failures surface to the caller immediately.
#[async_trait]
pub trait CollectionSource<T: Record>: Send + Sync {
    /// Current snapshot of every record
    async fn list(&self) -> Result<Vec<T>, AdminError>;

    /// One record by id
    async fn get(&self, id: &RecordId) -> Result<T, AdminError>;

    /// Create a record
    ///
    /// Returns the record as stored when the backend echoes it, `None` when
    /// the write was accepted with some other body.
    async fn create(&self, payload: &Value) -> Result<Option<T>, AdminError>;

    /// Replace fields of a record; echo rules as for [`create`](Self::create)
    async fn update(&self, id: &RecordId, payload: &Value) -> Result<Option<T>, AdminError>;

    /// Delete a record, returning the removed id
    async fn remove(&self, id: &RecordId) -> Result<RecordId, AdminError>;

    /// Call a sub-route such as `PATCH /{id}/toggle-status`
    ///
    /// Returns the updated record when the backend echoes one, `None` when
    /// it answers with something else (a bare message, an empty body).
    async fn action(
        &self,
        method: ActionMethod,
        id: &RecordId,
        verb: &str,
        payload: Option<&Value>,
    ) -> Result<Option<T>, AdminError>;
}

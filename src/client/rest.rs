//! reqwest-backed collection for one REST resource

use crate::client::envelope::{self, ListShape};
use crate::client::transport::ApiClient;
use crate::client::{ActionMethod, CollectionSource};
use crate::core::error::AdminError;
use crate::core::record::{Record, RecordId};
use async_trait::async_trait;
use reqwest::multipart::Form;
use serde_json::Value;
use std::marker::PhantomData;
use tracing::instrument;

/// Collection client for `/api/{resource}`
///
/// # Example
/// ```rust,ignore
/// let tags: RestCollection<Tag> = api.collection();
/// let snapshot = tags.list().await?;
/// let created: Option<Tag> = tags.create(&json!({"name": "Trending"})).await?;
/// ```
pub struct RestCollection<T> {
    client: ApiClient,
    path: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for RestCollection<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            path: self.path.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record> RestCollection<T> {
    /// Collection at the record type's default path
    pub fn new(client: ApiClient) -> Self {
        Self::with_path(client, format!("/api/{}", T::resource_name()))
    }

    /// Collection at an explicit path (e.g. `/api/queries` for [`JsonRecord`](crate::core::record::JsonRecord))
    pub fn with_path(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn collection_url(&self) -> String {
        self.client.url(&self.path)
    }

    fn record_url(&self, id: &RecordId) -> String {
        format!("{}/{}", self.collection_url(), id)
    }

    fn decode(&self, body: Value) -> Result<T, AdminError> {
        serde_json::from_value(envelope::unwrap_one(body))
            .map_err(|e| AdminError::decode(format!("{} record", T::resource_name()), e))
    }

    /// The record a write answered with, if the body carries one
    ///
    /// Records default every field, so a bare `{"message": ...}` decodes to
    /// a blank record; only a decoded record with an id counts as an echo.
    fn echoed(&self, body: Value, operation: &str) -> Option<T> {
        if body.is_null() {
            return None;
        }
        match serde_json::from_value::<T>(envelope::unwrap_one(body)) {
            Ok(record) if !record.id().is_empty() => Some(record),
            Ok(_) => {
                tracing::debug!("{} answered without a record id", operation);
                None
            }
            Err(e) => {
                tracing::debug!("{} did not echo a record: {}", operation, e);
                None
            }
        }
    }

    /// Create a record from a multipart form (fields plus uploaded files)
    #[instrument(skip(self, form), fields(path = %self.path))]
    pub async fn create_multipart(&self, form: Form) -> Result<Option<T>, AdminError> {
        let url = self.collection_url();
        let body = self
            .client
            .execute(self.client.http().post(&url).multipart(form), &url)
            .await?;
        Ok(self.echoed(body, "multipart create"))
    }

    /// Update a record from a multipart form
    #[instrument(skip(self, form), fields(path = %self.path, id = %id))]
    pub async fn update_multipart(
        &self,
        id: &RecordId,
        form: Form,
    ) -> Result<Option<T>, AdminError> {
        let url = self.record_url(id);
        let body = self
            .client
            .execute(self.client.http().put(&url).multipart(form), &url)
            .await?;
        Ok(self.echoed(body, "multipart update"))
    }
}

#[async_trait]
impl<T: Record> CollectionSource<T> for RestCollection<T> {
    #[instrument(skip(self), fields(path = %self.path))]
    async fn list(&self) -> Result<Vec<T>, AdminError> {
        let url = self.collection_url();
        let body = self.client.execute(self.client.http().get(&url), &url).await?;

        let (items, shape) = envelope::unwrap_list(body);
        if shape == ListShape::Unrecognized {
            tracing::warn!("Unrecognized list response shape, treating as empty");
        }

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item).map_err(|e| {
                    AdminError::decode(
                        format!("{} record #{}", T::resource_name(), index),
                        e,
                    )
                })
            })
            .collect()
    }

    #[instrument(skip(self), fields(path = %self.path))]
    async fn get(&self, id: &RecordId) -> Result<T, AdminError> {
        let url = self.record_url(id);
        let body = self.client.execute(self.client.http().get(&url), &url).await?;
        self.decode(body)
    }

    #[instrument(skip(self, payload), fields(path = %self.path))]
    async fn create(&self, payload: &Value) -> Result<Option<T>, AdminError> {
        let url = self.collection_url();
        let body = self
            .client
            .execute(self.client.http().post(&url).json(payload), &url)
            .await?;
        Ok(self.echoed(body, "create"))
    }

    #[instrument(skip(self, payload), fields(path = %self.path))]
    async fn update(&self, id: &RecordId, payload: &Value) -> Result<Option<T>, AdminError> {
        let url = self.record_url(id);
        let body = self
            .client
            .execute(self.client.http().put(&url).json(payload), &url)
            .await?;
        Ok(self.echoed(body, "update"))
    }

    #[instrument(skip(self), fields(path = %self.path))]
    async fn remove(&self, id: &RecordId) -> Result<RecordId, AdminError> {
        let url = self.record_url(id);
        self.client
            .execute(self.client.http().delete(&url), &url)
            .await?;
        Ok(id.clone())
    }

    #[instrument(skip(self, payload), fields(path = %self.path))]
    async fn action(
        &self,
        method: ActionMethod,
        id: &RecordId,
        verb: &str,
        payload: Option<&Value>,
    ) -> Result<Option<T>, AdminError> {
        let url = format!("{}/{}", self.record_url(id), verb);
        let mut request = match method {
            ActionMethod::Put => self.client.http().put(&url),
            ActionMethod::Patch => self.client.http().patch(&url),
        };
        if let Some(payload) = payload {
            request = request.json(payload);
        }

        let body = self.client.execute(request, &url).await?;
        Ok(self.echoed(body, &format!("{} {}", method, verb)))
    }
}

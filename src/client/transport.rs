//! HTTP transport shared by every collection of one dashboard
//!
//! Owns the reqwest client, the backend origin and the cookie jar that
//! carries the session cookie.

use crate::client::envelope;
use crate::client::rest::RestCollection;
use crate::config::ApiConfig;
use crate::core::error::{AdminError, ValidationError};
use crate::core::record::Record;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{RequestBuilder, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

/// Client for the dashboard's REST backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
    jar: Arc<Jar>,
}

impl ApiClient {
    /// Build a client; fails when no usable base URL is configured
    #[instrument(skip(config))]
    pub fn new(config: &ApiConfig) -> Result<Self, AdminError> {
        let base_url = config.base_url()?;
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AdminError::network(base_url.as_str(), e))?;

        tracing::debug!(base_url = %base_url, "Created API client");
        Ok(Self {
            base_url,
            http,
            jar,
        })
    }

    /// Backend origin every path is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for a path such as `/api/tags`
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Typed collection for `/api/{T::resource_name()}`
    pub fn collection<T: Record>(&self) -> RestCollection<T> {
        RestCollection::new(self.clone())
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Raw `Cookie` header the jar would send to the backend
    pub fn cookie_header(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|v| v.to_str().ok().map(str::to_string))
    }

    /// Store a `Set-Cookie` style string for the backend origin
    pub fn set_cookie(&self, cookie: &str) {
        self.jar.add_cookie_str(cookie, &self.base_url);
    }

    /// GET a path and return the decoded JSON body
    pub async fn get_json(&self, path: &str) -> Result<Value, AdminError> {
        let url = self.url(path);
        self.execute(self.http.get(&url), &url).await
    }

    /// POST a JSON body to a path and return the decoded JSON body
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value, AdminError> {
        let url = self.url(path);
        self.execute(self.http.post(&url).json(body), &url).await
    }

    /// Send a request and turn the response into JSON or an [`AdminError`]
    ///
    /// - send failure → `Network`
    /// - non-2xx → `Validation(Rejected)` carrying the body's `message`
    /// - empty 2xx body → `Value::Null`
    /// - unparseable 2xx body → `Decode`
    #[instrument(skip(self, request))]
    pub(crate) async fn execute(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<Value, AdminError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            AdminError::network(url, e)
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            AdminError::network(url, e)
        })?;

        if !status.is_success() {
            let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::Null);
            let message = envelope::error_message(&body)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            tracing::warn!(status = %status, "Backend rejected request: {}", message);
            return Err(ValidationError::Rejected {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            AdminError::decode(format!("response from {}", url), e)
        })
    }
}

//! Login and logout against the session-cookie backend
//!
//! The backend marks an authenticated admin with an HTTP-only cookie
//! (`session=valid` by default). The cookie lives in the [`ApiClient`]'s
//! jar, so every collection built from the same client sends it.

use crate::client::envelope;
use crate::client::transport::ApiClient;
use crate::config::SessionConfig;
use crate::core::error::{AdminError, ValidationError};
use crate::core::validation;
use serde_json::{Value, json};
use tracing::instrument;
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// The login form
#[derive(Debug, Clone, Default, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "Both fields are required!"))]
    pub username: String,
    #[validate(length(min = 1, message = "Both fields are required!"))]
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    api: ApiClient,
    config: SessionConfig,
}

impl Session {
    pub fn new(api: ApiClient, config: SessionConfig) -> Self {
        Self { api, config }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Is the session cookie present with its authenticated value?
    pub fn is_authenticated(&self) -> bool {
        let expected = format!("{}={}", self.config.cookie_name, self.config.cookie_value);
        self.api
            .cookie_header()
            .map(|header| header.split(';').any(|pair| pair.trim() == expected))
            .unwrap_or(false)
    }

    /// Send the credentials; succeeds once the backend has set the cookie
    ///
    /// Blank fields are rejected without contacting the backend. A body of
    /// `{"success": false, "message": ...}` is a rejection even on a 2xx
    /// status.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<(), AdminError> {
        validation::check(credentials)?;

        let body = self
            .api
            .post_json(
                &self.config.login_path,
                &json!({
                    "username": credentials.username,
                    "password": credentials.password,
                }),
            )
            .await?;

        if body.get("success").and_then(Value::as_bool) == Some(false) {
            let message = envelope::error_message(&body)
                .unwrap_or_else(|| INVALID_CREDENTIALS.to_string());
            tracing::warn!("Login rejected: {}", message);
            return Err(ValidationError::Rejected {
                status: 401,
                message,
            }
            .into());
        }

        if !self.is_authenticated() {
            tracing::warn!(
                cookie = %self.config.cookie_name,
                "Login succeeded but no session cookie was set"
            );
            return Err(ValidationError::Rejected {
                status: 401,
                message: INVALID_CREDENTIALS.to_string(),
            }
            .into());
        }

        tracing::info!("Logged in");
        Ok(())
    }

    /// Tell the backend, then expire the cookie locally either way
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AdminError> {
        let result = self
            .api
            .post_json(&self.config.logout_path, &json!({}))
            .await;

        self.api
            .set_cookie(&format!("{}=; Max-Age=0; Path=/", self.config.cookie_name));

        match result {
            Ok(_) => {
                tracing::info!("Logged out");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Logout request failed, session cleared locally: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;

    fn session() -> Session {
        let api = ApiClient::new(&ApiConfig {
            base_url: Some("http://127.0.0.1:9".to_string()),
            ..ApiConfig::default()
        })
        .unwrap();
        Session::new(api, SessionConfig::default())
    }

    #[tokio::test]
    async fn test_blank_fields_rejected_locally() {
        let session = session();
        let err = session
            .login(&Credentials::new("admin", ""))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Both fields are required!");
    }

    #[test]
    fn test_cookie_value_decides_authentication() {
        let session = session();
        assert!(!session.is_authenticated());

        session.api().set_cookie("session=expired; Path=/");
        assert!(!session.is_authenticated());

        session.api().set_cookie("session=valid; Path=/");
        assert!(session.is_authenticated());
    }
}

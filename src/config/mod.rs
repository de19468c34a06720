//! Configuration loading and management

use crate::core::error::{AdminError, ConfigError};
use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable replacing `api.base_url`
pub const BASE_URL_ENV: &str = "STOREFRONT_API_BASE_URL";

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin of the REST backend (e.g., "http://localhost:5000")
    pub base_url: Option<String>,

    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 15,
        }
    }
}

impl ApiConfig {
    /// Parsed base URL, normalized without a trailing slash
    ///
    /// Fails when the URL is missing, blank, unparseable or not http(s).
    pub fn base_url(&self) -> Result<Url, AdminError> {
        let raw = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingField {
                field: "api.base_url".to_string(),
            })?;

        let invalid = |message: String| ConfigError::InvalidValue {
            field: "api.base_url".to_string(),
            value: raw.to_string(),
            message,
        };

        let url = Url::parse(raw.trim_end_matches('/')).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme '{}'", other)).into()),
        }
    }
}

/// Session cookie collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub login_path: String,
    pub logout_path: String,

    /// Name of the HTTP-only cookie the backend sets on login
    pub cookie_name: String,

    /// Value that marks an authenticated session
    pub cookie_value: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            login_path: "/api/auth/login".to_string(),
            logout_path: "/api/auth/logout".to_string(),
            cookie_name: "session".to_string(),
            cookie_value: "valid".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "storefront=info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// YAML file holding theme and sidebar state; in-memory when absent
    pub path: Option<PathBuf>,
}

/// Complete configuration for the dashboard client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
    pub preferences: PreferencesConfig,
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("{} overrides api.base_url", BASE_URL_ENV);
            self.api.base_url = Some(url);
        }
        self
    }

    /// Check that a client can be built from this configuration
    pub fn validate(&self) -> Result<(), AdminError> {
        self.api.base_url()?;
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                value: "0".to_string(),
                message: "timeout must be at least one second".to_string(),
            }
            .into());
        }
        if self.session.cookie_name.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "session.cookie_name".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

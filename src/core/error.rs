//! Typed error handling for the dashboard client
//!
//! Every failure in this crate is scoped to a single screen request. Screens
//! catch an [`AdminError`], turn it into a [`Notice`](crate::core::notice::Notice)
//! through [`AdminError::user_message`], and keep running.
//!
//! # Error Categories
//!
//! - `Network`: the request could not be sent or no response arrived
//! - `Decode`: the response body was not the JSON we expected
//! - [`ValidationError`]: the backend rejected the request (non-2xx), or a
//!   form failed local validation before anything was sent
//! - [`ConfigError`]: the client is misconfigured (e.g. no base URL)
//! - `Busy`: a mutation was attempted while the screen was not ready
//!
//! # Example
//!
//! ```rust,ignore
//! match screen.dispatch(mutation).await {
//!     Ok(outcome) => println!("{:?}", outcome),
//!     Err(AdminError::Validation(ValidationError::Rejected { message, .. })) => {
//!         println!("backend said: {}", message);
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use serde::Serialize;
use std::fmt;

/// The main error type for the dashboard client
#[derive(Debug)]
pub enum AdminError {
    /// The request could not be sent or the response never arrived
    Network { url: String, message: String },

    /// The response body could not be decoded
    Decode { context: String, message: String },

    /// The backend or a local form check refused the input
    Validation(ValidationError),

    /// Configuration is missing or invalid
    Config(ConfigError),

    /// A mutation was attempted while the screen was loading or submitting
    Busy { state: &'static str },

    /// A record the caller referenced is not in the collection
    NotFound { resource: String, id: String },

    /// Internal errors (lock poisoning, invariant violations)
    Internal(String),
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminError::Network { url, message } => {
                write!(f, "Request to '{}' failed: {}", url, message)
            }
            AdminError::Decode { context, message } => {
                write!(f, "Failed to decode {}: {}", context, message)
            }
            AdminError::Validation(e) => write!(f, "{}", e),
            AdminError::Config(e) => write!(f, "{}", e),
            AdminError::Busy { state } => {
                write!(f, "Screen is {}; try again when it is ready", state)
            }
            AdminError::NotFound { resource, id } => {
                write!(f, "{} with id '{}' not found", resource, id)
            }
            AdminError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AdminError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdminError::Validation(e) => Some(e),
            AdminError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl AdminError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminError::Network { .. } => "NETWORK_ERROR",
            AdminError::Decode { .. } => "DECODE_ERROR",
            AdminError::Validation(_) => "VALIDATION_ERROR",
            AdminError::Config(_) => "CONFIG_ERROR",
            AdminError::Busy { .. } => "SCREEN_BUSY",
            AdminError::NotFound { .. } => "NOT_FOUND",
            AdminError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The text a screen shows in its toast or inline error slot
    ///
    /// A backend rejection is shown verbatim, so `{"message": "Tag already exists"}`
    /// becomes exactly `Tag already exists`.
    pub fn user_message(&self) -> String {
        match self {
            AdminError::Validation(e) => e.user_message(),
            AdminError::Network { .. } => {
                "Could not reach the server. Check your connection and retry.".to_string()
            }
            AdminError::Decode { .. } => "The server sent an unexpected response.".to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status of a backend rejection, if this error came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            AdminError::Validation(ValidationError::Rejected { status, .. }) => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn network(url: impl Into<String>, message: impl fmt::Display) -> Self {
        AdminError::Network {
            url: url.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn decode(context: impl Into<String>, message: impl fmt::Display) -> Self {
        AdminError::Decode {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Single-field form error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AdminError::Validation(ValidationError::FieldError {
            field: field.into(),
            message: message.into(),
        })
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised when input is refused
#[derive(Debug)]
pub enum ValidationError {
    /// The backend answered with a non-2xx status
    Rejected { status: u16, message: String },

    /// A single form field failed a local check
    FieldError { field: String, message: String },

    /// Several form fields failed local checks
    FieldErrors(Vec<FieldValidationError>),
}

/// One failed field of a form
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Rejected { status, message } => {
                write!(f, "Request rejected ({}): {}", status, message)
            }
            ValidationError::FieldError { field, message } => {
                write!(f, "Invalid field '{}': {}", field, message)
            }
            ValidationError::FieldErrors(errors) => {
                let joined = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "Validation failed: {}", joined)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::Rejected { message, .. } => message.clone(),
            ValidationError::FieldError { message, .. } => message.clone(),
            ValidationError::FieldErrors(errors) => errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| "Invalid input".to_string()),
        }
    }
}

impl From<ValidationError> for AdminError {
    fn from(err: ValidationError) -> Self {
        AdminError::Validation(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Missing required setting
    MissingField { field: String },

    /// Invalid value for a setting
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::MissingField { field } => {
                write!(f, "Missing required setting '{}'", field)
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for setting '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { message } => write!(f, "IO error: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for AdminError {
    fn from(err: ConfigError) -> Self {
        AdminError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();
        if err.is_decode() {
            AdminError::decode(url, err)
        } else {
            AdminError::network(url, err)
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        AdminError::decode("JSON", err)
    }
}

impl From<serde_yaml::Error> for AdminError {
    fn from(err: serde_yaml::Error) -> Self {
        AdminError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        AdminError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<validator::ValidationErrors> for AdminError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("'{}' is invalid", field)),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AdminError::Validation(ValidationError::FieldErrors(fields))
    }
}

//! Form validation and payload filtering
//!
//! Forms are checked before anything is sent: typed drafts derive
//! [`validator::Validate`], and [`FilterChain`] normalizes the JSON payload
//! (trimming names, uppercasing coupon codes, rounding prices).

pub mod filters;

pub use filters::{FilterChain, PayloadFilter};

use crate::core::error::AdminError;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Validate a draft, converting failures into an [`AdminError::Validation`]
pub fn check<T: Validate>(draft: &T) -> Result<(), AdminError> {
    draft.validate().map_err(AdminError::from)
}

/// A validator error carrying the exact text shown to the user
pub fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Login {
        #[validate(length(min = 1, message = "Both fields are required!"))]
        email: String,
    }

    #[test]
    fn test_check_maps_to_field_errors() {
        let err = check(&Login {
            email: String::new(),
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.user_message(), "Both fields are required!");

        assert!(check(&Login {
            email: "a@b.c".to_string()
        })
        .is_ok());
    }

    #[test]
    fn test_rule_error_message() {
        let err = rule_error("blank", "Tag name cannot be empty");
        assert_eq!(err.code, "blank");
        assert_eq!(err.message.as_deref(), Some("Tag name cannot be empty"));
    }
}

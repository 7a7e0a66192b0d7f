//! Validated JSON extractor with automatic validation.
//!
//! This module provides [`ValidateJson`], a JSON extractor that combines
//! deserialization with automatic validation using the `validator` crate.

use std::borrow::Cow;
use std::collections::HashMap;

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// JSON extractor with automatic validation using the `validator` crate.
///
/// Works with any type that implements both `serde::Deserialize` and
/// `validator::Validate`; validation failures are reported field by field
/// in the error response.
///
/// Also see [`Json`].
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Creates a new instance of [`ValidateJson`].
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;

        data.validate()?;
        Ok(Self::new(data))
    }
}

/// Formats length validation errors with appropriate units and context.
fn format_length_error(
    field: &str,
    params: &HashMap<Cow<'static, str>, serde_json::Value>,
) -> String {
    match (
        params.get("min").and_then(extract_number_from_json),
        params.get("max").and_then(extract_number_from_json),
    ) {
        (Some(min), Some(max)) => format!(
            "Field '{}' must be between {} and {} characters long",
            field, min as u64, max as u64
        ),
        (Some(min), None) => format!(
            "Field '{}' must be at least {} characters long",
            field, min as u64
        ),
        (None, Some(max)) => format!(
            "Field '{}' must be at most {} characters long",
            field, max as u64
        ),
        _ => format!("Field '{}' has invalid length", field),
    }
}

/// Extracts a number from a JSON value, supporting both integers and floats.
fn extract_number_from_json(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Formats validation errors with context-aware, user-friendly messages.
fn format_validation_error(field: &str, error: &validator::ValidationError) -> String {
    // Use custom message if provided, otherwise generate appropriate message
    if let Some(custom_message) = &error.message {
        return format!("Field '{}': {}", field, custom_message);
    }

    let message = match error.code.as_ref() {
        "required" => "is required and cannot be empty".to_string(),
        "length" => return format_length_error(field, &error.params),
        "email" => "must be a valid email address (e.g., user@example.com)".to_string(),
        "regex" => "format is invalid - please check the required pattern".to_string(),
        code => format!("failed validation: {}", code),
    };

    format!("Field '{}' {}", field, message)
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let error_messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();

        let user_message = match error_messages.as_slice() {
            [] => "Validation failed".to_string(),
            [single_error] => single_error.clone(),
            multiple => multiple.join(". "),
        };

        tracing::warn!(
            errors = ?errors.field_errors(),
            "request validation failed"
        );

        ErrorKind::BadRequest
            .with_message(user_message)
            .with_resource("request")
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 4, max = 15))]
        username: String,
        #[validate(email)]
        email_address: String,
    }

    #[test]
    fn validation_errors_mention_every_failing_field() {
        let probe = Probe {
            username: "ab".to_owned(),
            email_address: "not-an-email".to_owned(),
        };

        let errors = probe.validate().expect_err("both fields invalid");
        let error: Error<'_> = errors.into();

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        let message = error.message().expect("message set");
        assert!(message.contains("username"));
        assert!(message.contains("email_address"));
    }

    #[test]
    fn length_errors_carry_bounds() {
        let probe = Probe {
            username: "a".repeat(20),
            email_address: "user@example.com".to_owned(),
        };

        let errors = probe.validate().expect_err("username too long");
        let error: Error<'_> = errors.into();
        let message = error.message().expect("message set");

        assert!(message.contains("between 4 and 15"));
    }
}

//! User request types.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request payload to register a new user.
///
/// Field-shape validation happens here; password strength is checked
/// separately by the handler against the submitted user attributes.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    /// Login name (4-15 characters, letters, digits and underscores).
    #[validate(length(min = 4, max = 15), custom(function = validate_username))]
    pub username: String,

    /// Email address (must be valid email format).
    #[validate(email)]
    pub email_address: String,

    /// Given name (1-150 characters).
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,

    /// Family name (1-150 characters).
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,

    /// Plaintext password (9-128 characters, hashed before storage).
    #[validate(length(min = 9, max = 128))]
    pub password: String,
}

/// Request payload to update a user.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    /// New login name (4-15 characters, letters, digits and underscores).
    #[validate(length(min = 4, max = 15), custom(function = validate_username))]
    pub username: Option<String>,

    /// New email address (must be valid email format).
    #[validate(email)]
    pub email_address: Option<String>,

    /// New given name (1-150 characters).
    #[validate(length(min = 1, max = 150))]
    pub first_name: Option<String>,

    /// New family name (1-150 characters).
    #[validate(length(min = 1, max = 150))]
    pub last_name: Option<String>,

    /// New plaintext password (9-128 characters, hashed before storage).
    #[validate(length(min = 9, max = 128))]
    pub password: Option<String>,
}

impl UpdateUser {
    /// Returns whether the payload carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email_address.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.password.is_none()
    }
}

/// Request payload to verify a user's password.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPassword {
    /// Plaintext password to verify against the stored credential.
    pub password: String,
}

/// Restricts usernames to letters, digits and underscores.
fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(ValidationError::new("username_format")
            .with_message("may only contain letters, digits and underscores".into()))
    }
}

//! User response types.

use serde::{Deserialize, Serialize};
use skillbase_postgres::models;
use time::OffsetDateTime;
use uuid::Uuid;

/// Public projection of a user account.
///
/// The stored password hash never leaves the persistence layer; this type
/// deliberately has no field for it.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email_address: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Whether the user has unrestricted administrative rights.
    pub is_superuser: bool,
    /// Whether the user can access staff-only functionality.
    pub is_staff: bool,
    /// Whether the account is active and allowed to authenticate.
    pub is_active: bool,
    /// Timestamp when the user registered.
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
    /// Timestamp of the last successful password verification.
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login_at: Option<OffsetDateTime>,
}

impl User {
    /// Creates a response from the database model.
    pub fn from_model(user: models::User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email_address: user.email_address,
            first_name: user.first_name,
            last_name: user.last_name,
            is_superuser: user.is_superuser,
            is_staff: user.is_staff,
            is_active: user.is_active,
            joined_at: user.joined_at,
            last_login_at: user.last_login_at,
        }
    }
}

//! User account model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::users;

/// A registered user account.
///
/// The `password_hash` column stores either an encoded Argon2id hash or an
/// unusable-password sentinel; it is never exposed through the HTTP layer.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// Login name, unique across the system (4-15 characters)
    pub username: String,
    /// Email address, unique across the system
    pub email_address: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Encoded password hash or unusable sentinel
    pub password_hash: String,
    /// Whether the user has unrestricted administrative rights
    pub is_superuser: bool,
    /// Whether the user can access staff-only functionality
    pub is_staff: bool,
    /// Whether the account is active and allowed to authenticate
    pub is_active: bool,
    /// Timestamp when the user registered
    pub joined_at: OffsetDateTime,
    /// Timestamp of the last successful password verification
    pub last_login_at: Option<OffsetDateTime>,
    /// Timestamp when the row was created
    pub created_at: OffsetDateTime,
    /// Timestamp when the row was last updated
    pub updated_at: OffsetDateTime,
}

/// Data for creating a new user.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUser {
    /// Login name
    pub username: String,
    /// Email address
    pub email_address: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Encoded password hash or unusable sentinel
    pub password_hash: String,
    /// Unrestricted administrative rights
    pub is_superuser: bool,
    /// Staff-only functionality access
    pub is_staff: bool,
    /// Account is active
    pub is_active: bool,
    /// Registration timestamp; defaults to now when omitted
    pub joined_at: Option<OffsetDateTime>,
}

/// Data for updating a user.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateUser {
    /// Login name
    pub username: Option<String>,
    /// Email address
    pub email_address: Option<String>,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Encoded password hash or unusable sentinel
    pub password_hash: Option<String>,
    /// Unrestricted administrative rights
    pub is_superuser: Option<bool>,
    /// Staff-only functionality access
    pub is_staff: Option<bool>,
    /// Account is active
    pub is_active: Option<bool>,
    /// Last successful password verification
    pub last_login_at: Option<OffsetDateTime>,
}

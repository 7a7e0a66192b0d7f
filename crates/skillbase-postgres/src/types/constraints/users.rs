//! Users table constraint violations.

use strum::{Display, EnumString};

use super::ConstraintCategory;

/// Users table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display, EnumString)]
pub enum UserConstraints {
    // User validation constraints
    #[strum(serialize = "users_username_length")]
    UsernameLength,
    #[strum(serialize = "users_username_format")]
    UsernameFormat,
    #[strum(serialize = "users_email_address_format")]
    EmailFormat,
    #[strum(serialize = "users_first_name_not_empty")]
    FirstNameNotEmpty,
    #[strum(serialize = "users_last_name_not_empty")]
    LastNameNotEmpty,
    #[strum(serialize = "users_password_hash_not_empty")]
    PasswordHashNotEmpty,

    // User unique constraints
    #[strum(serialize = "users_username_unique_idx")]
    UsernameUnique,
    #[strum(serialize = "users_email_address_unique_idx")]
    EmailAddressUnique,
}

impl UserConstraints {
    /// Creates a new [`UserConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            UserConstraints::UsernameLength
            | UserConstraints::UsernameFormat
            | UserConstraints::EmailFormat
            | UserConstraints::FirstNameNotEmpty
            | UserConstraints::LastNameNotEmpty
            | UserConstraints::PasswordHashNotEmpty => ConstraintCategory::Validation,

            UserConstraints::UsernameUnique | UserConstraints::EmailAddressUnique => {
                ConstraintCategory::Uniqueness
            }
        }
    }
}

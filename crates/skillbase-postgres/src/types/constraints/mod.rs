//! Database constraint violations organized by table.
//!
//! Constraint names in the migrations are stable identifiers; parsing them
//! into typed variants lets the HTTP layer translate violations into
//! precise, user-facing responses without string matching at call sites.

pub mod skills;
pub mod users;

use std::fmt;

pub use skills::SkillConstraints;
pub use users::UserConstraints;

/// Unified constraint violation enum that can represent any database
/// constraint recognized by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// Constraints of the `users` table.
    User(UserConstraints),
    /// Constraints of the `skills` table.
    Skill(SkillConstraints),
}

/// Categories of database constraint violations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintCategory {
    /// Data validation constraints (format, length, emptiness checks).
    Validation,
    /// Uniqueness constraints (primary keys, unique indexes).
    Uniqueness,
}

impl ConstraintViolation {
    /// Creates a new [`ConstraintViolation`] from the constraint name.
    ///
    /// # Returns
    ///
    /// - `Some(ConstraintViolation)` if the constraint name is recognized
    /// - `None` otherwise
    pub fn new(constraint: &str) -> Option<Self> {
        if let Some(c) = UserConstraints::new(constraint) {
            return Some(ConstraintViolation::User(c));
        }
        if let Some(c) = SkillConstraints::new(constraint) {
            return Some(ConstraintViolation::Skill(c));
        }
        None
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            ConstraintViolation::User(c) => c.categorize(),
            ConstraintViolation::Skill(c) => c.categorize(),
        }
    }
}

impl fmt::Display for ConstraintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintViolation::User(c) => c.fmt(f),
            ConstraintViolation::Skill(c) => c.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_known_constraints() {
        let violation = ConstraintViolation::new("users_username_unique_idx");
        assert_eq!(
            violation,
            Some(ConstraintViolation::User(UserConstraints::UsernameUnique))
        );

        let violation = ConstraintViolation::new("skills_name_unique_idx");
        assert_eq!(
            violation,
            Some(ConstraintViolation::Skill(SkillConstraints::NameUnique))
        );
    }

    #[test]
    fn rejects_unknown_constraints() {
        assert_eq!(ConstraintViolation::new("unknown_constraint"), None);
    }

    #[test]
    fn categorizes_uniqueness() {
        let violation = ConstraintViolation::new("users_email_address_unique_idx")
            .expect("known constraint");
        assert_eq!(violation.categorize(), ConstraintCategory::Uniqueness);
    }
}

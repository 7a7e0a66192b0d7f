//! Skills table constraint violations.

use strum::{Display, EnumString};

use super::ConstraintCategory;

/// Skills table constraint violations.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Display, EnumString)]
pub enum SkillConstraints {
    // Skill validation constraints
    #[strum(serialize = "skills_name_length")]
    NameLength,

    // Skill unique constraints
    #[strum(serialize = "skills_name_unique_idx")]
    NameUnique,
}

impl SkillConstraints {
    /// Creates a new [`SkillConstraints`] from the constraint name.
    pub fn new(constraint: &str) -> Option<Self> {
        constraint.parse().ok()
    }

    /// Returns the category of this constraint violation.
    pub fn categorize(&self) -> ConstraintCategory {
        match self {
            SkillConstraints::NameLength => ConstraintCategory::Validation,
            SkillConstraints::NameUnique => ConstraintCategory::Uniqueness,
        }
    }
}

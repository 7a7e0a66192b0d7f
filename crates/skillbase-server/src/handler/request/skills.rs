//! Skill request types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request payload to create a new skill.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkill {
    /// Skill name (2-64 characters).
    #[validate(length(min = 2, max = 64))]
    pub name: String,
}

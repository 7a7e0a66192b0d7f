//! Skill response types.

use serde::{Deserialize, Serialize};
use skillbase_postgres::models;
use time::OffsetDateTime;
use uuid::Uuid;

/// Public projection of a skill.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    /// Unique skill identifier.
    pub id: Uuid,
    /// Skill name.
    pub name: String,
    /// Timestamp when the skill was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Skill {
    /// Creates a response from the database model.
    pub fn from_model(skill: models::Skill) -> Self {
        Self {
            id: skill.id,
            name: skill.name,
            created_at: skill.created_at,
        }
    }
}

//! Skill catalog model for PostgreSQL database operations.

use diesel::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::schema::skills;

/// A registrable skill.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Skill {
    /// Unique skill identifier
    pub id: Uuid,
    /// Skill name, unique across the catalog (2-64 characters)
    pub name: String,
    /// Timestamp when the skill was created
    pub created_at: OffsetDateTime,
}

/// Data for creating a new skill.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = skills)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewSkill {
    /// Skill name
    pub name: String,
}

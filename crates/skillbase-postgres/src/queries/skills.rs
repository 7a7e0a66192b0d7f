//! Skill repository for managing skill database operations.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::Pagination;
use crate::models::{NewSkill, Skill};
use crate::{PgError, PgResult, schema};

/// Repository for skill-related database operations.
///
/// Duplicate skill names surface as unique-constraint violations on the
/// returned [`PgError`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SkillRepository;

impl SkillRepository {
    /// Creates a new skill in the database.
    pub async fn create_skill(
        conn: &mut AsyncPgConnection,
        new_skill: NewSkill,
    ) -> PgResult<Skill> {
        use schema::skills;

        diesel::insert_into(skills::table)
            .values(&new_skill)
            .returning(Skill::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)
    }

    /// Finds a skill by its ID.
    pub async fn find_skill_by_id(
        conn: &mut AsyncPgConnection,
        skill_id: Uuid,
    ) -> PgResult<Option<Skill>> {
        use schema::skills::{self, dsl};

        skills::table
            .filter(dsl::id.eq(skill_id))
            .select(Skill::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }

    /// Finds a skill by its name.
    pub async fn find_skill_by_name(
        conn: &mut AsyncPgConnection,
        name: &str,
    ) -> PgResult<Option<Skill>> {
        use schema::skills::{self, dsl};

        skills::table
            .filter(dsl::name.eq(name))
            .select(Skill::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }

    /// Lists skills in alphabetical order.
    pub async fn list_skills(
        conn: &mut AsyncPgConnection,
        pagination: Pagination,
    ) -> PgResult<Vec<Skill>> {
        use schema::skills::{self, dsl};

        skills::table
            .order(dsl::name.asc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Skill::as_select())
            .load(conn)
            .await
            .map_err(PgError::from)
    }
}

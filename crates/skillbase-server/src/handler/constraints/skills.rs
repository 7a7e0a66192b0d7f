//! Skill-related constraint violation error handlers.

use skillbase_postgres::types::SkillConstraints;

use crate::handler::{Error, ErrorKind};

impl From<SkillConstraints> for Error<'static> {
    fn from(c: SkillConstraints) -> Self {
        match c {
            SkillConstraints::NameLength => ErrorKind::BadRequest
                .with_context("Skill name must be between 2 and 64 characters long")
                .with_resource("skill"),
            SkillConstraints::NameUnique => ErrorKind::Conflict
                .with_message("A skill with this name already exists")
                .with_resource("skill/name"),
        }
    }
}

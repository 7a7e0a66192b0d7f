//! Repository-style query modules for the registration service tables.

mod skills;
mod users;

pub use skills::SkillRepository;
pub use users::UserRepository;

/// Limit/offset pagination for list queries.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Maximum number of rows to return.
    pub limit: i64,
    /// Number of rows to skip.
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

//! Request payload types for all handlers.

mod pagination;
mod skills;
mod users;

pub use pagination::ListParams;
pub use skills::CreateSkill;
pub use users::{RegisterUser, UpdateUser, VerifyPassword};

//! Database models for the `users` and `skills` tables.

mod skill;
mod user;

pub use skill::{NewSkill, Skill};
pub use user::{NewUser, UpdateUser, User};

//! Response payload types for all handlers.

mod error_response;
mod monitors;
mod skills;
mod users;

pub use error_response::ErrorResponse;
pub use monitors::HealthStatus;
pub use skills::Skill;
pub use users::User;

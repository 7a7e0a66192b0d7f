//! Shared database types.

mod constraints;

pub use constraints::{
    ConstraintCategory, ConstraintViolation, SkillConstraints, UserConstraints,
};

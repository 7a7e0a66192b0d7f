//! User-related constraint violation error handlers.

use skillbase_postgres::types::UserConstraints;

use crate::handler::{Error, ErrorKind};

impl From<UserConstraints> for Error<'static> {
    fn from(c: UserConstraints) -> Self {
        match c {
            UserConstraints::UsernameLength => ErrorKind::BadRequest
                .with_context("Username must be between 4 and 15 characters long")
                .with_resource("user"),
            UserConstraints::UsernameFormat => ErrorKind::BadRequest
                .with_context("Username may only contain letters, digits and underscores")
                .with_resource("user"),
            UserConstraints::EmailFormat => ErrorKind::BadRequest
                .with_context("Invalid email address format")
                .with_resource("user"),
            UserConstraints::FirstNameNotEmpty => ErrorKind::BadRequest
                .with_context("First name cannot be empty")
                .with_resource("user"),
            UserConstraints::LastNameNotEmpty => ErrorKind::BadRequest
                .with_context("Last name cannot be empty")
                .with_resource("user"),
            UserConstraints::PasswordHashNotEmpty => ErrorKind::InternalServerError.into_error(),
            UserConstraints::UsernameUnique => ErrorKind::Conflict
                .with_message("A user with this username already exists")
                .with_resource("user/username"),
            UserConstraints::EmailAddressUnique => ErrorKind::Conflict
                .with_message("A user with this email address already exists")
                .with_resource("user/email_address"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violations_become_conflicts_keyed_by_field() {
        let error: Error<'_> = UserConstraints::UsernameUnique.into();
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.resource(), Some("user/username"));

        let error: Error<'_> = UserConstraints::EmailAddressUnique.into();
        assert_eq!(error.kind(), ErrorKind::Conflict);
        assert_eq!(error.resource(), Some("user/email_address"));
    }
}

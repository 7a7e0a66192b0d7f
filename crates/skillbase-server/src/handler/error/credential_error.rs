//! Credential subsystem error to HTTP error conversion handlers.

use skillbase_core::{CredentialError, InvalidPasswordError};

use crate::handler::{Error, ErrorKind};

/// Tracing target for credential error translation.
const TRACING_TARGET: &str = "skillbase_server::credential_errors";

impl From<CredentialError> for Error<'static> {
    fn from(error: CredentialError) -> Self {
        // Malformed salts and unparseable hashes are server-side defects,
        // never something the client can correct.
        tracing::error!(
            target: TRACING_TARGET,
            error = %error,
            "credential operation failed"
        );

        ErrorKind::InternalServerError
            .with_message("Password processing failed")
            .with_resource("credentials")
    }
}

impl From<InvalidPasswordError> for Error<'static> {
    fn from(error: InvalidPasswordError) -> Self {
        let reason = error.reason();

        tracing::debug!(
            target: TRACING_TARGET,
            reason = %reason,
            "password rejected by strength policy"
        );

        ErrorKind::BadRequest
            .with_message(error.to_string())
            .with_context(reason.to_string())
            .with_resource("password")
    }
}

#[cfg(test)]
mod tests {
    use skillbase_core::InvalidPasswordError;

    use super::*;

    #[test]
    fn strength_failures_map_to_bad_request() {
        let error: Error<'_> = InvalidPasswordError::TooShort { min: 9 }.into();

        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.context(), Some("TOO_SHORT"));
        assert_eq!(error.resource(), Some("password"));
    }

    #[test]
    fn credential_failures_map_to_internal_error() {
        let error: Error<'_> = CredentialError::MalformedHash.into();

        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }
}

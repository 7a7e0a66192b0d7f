//! Error types for the credential subsystem.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The error type for password hash encoding and decoding.
#[derive(Debug, thiserror::Error)]
#[must_use = "credential errors should be handled appropriately"]
pub enum CredentialError {
    /// A caller violated an encode precondition, e.g. supplied an empty
    /// salt or a salt containing the field delimiter.
    #[error("invalid input: {0}")]
    InvalidInput(Cow<'static, str>),

    /// A stored hash does not parse as the supported encoding.
    #[error("malformed password hash")]
    MalformedHash,

    /// The key-derivation function rejected its parameters or inputs.
    #[error("key derivation failed: {0}")]
    Kdf(argon2::Error),
}

impl CredentialError {
    /// Creates a new [`CredentialError::InvalidInput`].
    #[inline]
    pub fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Machine-readable reason code for a rejected password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString)]
pub enum PasswordWeakness {
    /// The password is shorter than the configured minimum.
    #[serde(rename = "TOO_SHORT")]
    #[strum(serialize = "TOO_SHORT")]
    TooShort,
    /// The password is longer than the configured maximum.
    #[serde(rename = "TOO_LONG")]
    #[strum(serialize = "TOO_LONG")]
    TooLong,
    /// Every character of the password is a decimal digit.
    #[serde(rename = "ENTIRELY_NUMERIC")]
    #[strum(serialize = "ENTIRELY_NUMERIC")]
    EntirelyNumeric,
    /// The password closely resembles one of the user's own attributes.
    #[serde(rename = "TOO_SIMILAR")]
    #[strum(serialize = "TOO_SIMILAR")]
    TooSimilar,
    /// The password appears in the common-password list.
    #[serde(rename = "TOO_COMMON")]
    #[strum(serialize = "TOO_COMMON")]
    TooCommon,
}

/// The error type for the password strength pipeline.
///
/// Each variant corresponds to one validation stage; the pipeline stops at
/// the first failing stage, so callers always observe a single reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[must_use = "validation errors should be surfaced to the caller"]
pub enum InvalidPasswordError {
    /// The password has fewer than `min` characters.
    #[error("password cannot have less than {min} characters")]
    TooShort {
        /// Configured minimum length.
        min: usize,
    },

    /// The password has more than `max` characters.
    #[error("password cannot have more than {max} characters")]
    TooLong {
        /// Configured maximum length.
        max: usize,
    },

    /// The password consists entirely of decimal digits.
    #[error("password cannot be entirely numeric")]
    EntirelyNumeric,

    /// The password is too similar to one of the user's attributes.
    #[error("password is too similar to the {attribute}")]
    TooSimilar {
        /// Name of the offending attribute, e.g. `username`.
        attribute: &'static str,
    },

    /// The password is a known common password.
    #[error("password is too common")]
    TooCommon,
}

impl InvalidPasswordError {
    /// Returns the machine-readable reason code for this rejection.
    pub const fn reason(&self) -> PasswordWeakness {
        match self {
            Self::TooShort { .. } => PasswordWeakness::TooShort,
            Self::TooLong { .. } => PasswordWeakness::TooLong,
            Self::EntirelyNumeric => PasswordWeakness::EntirelyNumeric,
            Self::TooSimilar { .. } => PasswordWeakness::TooSimilar,
            Self::TooCommon => PasswordWeakness::TooCommon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_codes_are_stable() {
        assert_eq!(PasswordWeakness::TooShort.to_string(), "TOO_SHORT");
        assert_eq!(
            PasswordWeakness::EntirelyNumeric.to_string(),
            "ENTIRELY_NUMERIC"
        );
        assert_eq!(
            InvalidPasswordError::TooCommon.reason().to_string(),
            "TOO_COMMON"
        );
    }

    #[test]
    fn messages_carry_policy_bounds() {
        let error = InvalidPasswordError::TooShort { min: 9 };
        assert_eq!(
            error.to_string(),
            "password cannot have less than 9 characters"
        );

        let error = InvalidPasswordError::TooSimilar {
            attribute: "username",
        };
        assert_eq!(
            error.to_string(),
            "password is too similar to the username"
        );
    }
}

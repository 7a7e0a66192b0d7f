#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for credential creation and verification.
pub const TRACING_TARGET_CREDENTIAL: &str = "skillbase_core::credential";

/// Tracing target for password strength validation.
pub const TRACING_TARGET_STRENGTH: &str = "skillbase_core::strength";

/// Tracing target for the common-password list loader.
pub const TRACING_TARGET_WORDLIST: &str = "skillbase_core::wordlist";

mod codec;
mod credential;
mod error;
mod params;
mod strength;
mod token;
mod wordlist;

pub use crate::codec::{DecodedHash, HashCodec};
pub use crate::credential::{CredentialService, UNUSABLE_PASSWORD_PREFIX};
pub use crate::error::{CredentialError, InvalidPasswordError, PasswordWeakness};
pub use crate::params::HashParams;
pub use crate::strength::{PasswordPolicy, PasswordStrength, UserAttributes};
pub use crate::token::{ALPHANUMERIC, TokenGenerator, entropy_bits};
pub use crate::wordlist::CommonPasswordList;

//! Encoding, decoding and verification of Argon2id password hashes.
//!
//! The encoded text format is a single string of five `$`-separated fields:
//!
//! ```text
//! argon2id$v=19$m=102400,t=2,p=8$<salt>$<base64-digest>
//! ```
//!
//! The salt is embedded in plaintext (it is not a secret) and the digest is
//! standard unpadded base64. Embedding the algorithm tag and all cost
//! parameters makes every stored value self-describing, so the process-wide
//! parameters can change between deployments without invalidating
//! credentials hashed under older settings.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD_NO_PAD as BASE64;
use subtle::ConstantTimeEq;

use crate::error::CredentialError;
use crate::params::HashParams;
use crate::token::{ALPHANUMERIC, entropy_bits};

/// Algorithm tag embedded in every encoded hash.
const ALGORITHM_TAG: &str = "argon2id";

/// Argon2 version embedded in every encoded hash (0x13).
const ARGON2_VERSION: u32 = 19;

/// Field delimiter of the encoded text format.
const FIELD_DELIMITER: char = '$';

/// Number of `$`-separated fields in a well-formed encoded hash.
const FIELD_COUNT: usize = 5;

/// Digest length in bytes for newly created hashes.
const DIGEST_LENGTH: usize = 32;

/// A password hash decoded back into its constituent fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHash<'a> {
    /// Number of passes over the memory.
    pub time_cost: u32,
    /// Memory size in KiB.
    pub memory_cost: u32,
    /// Number of parallel lanes.
    pub parallelism: u32,
    /// The embedded plaintext salt.
    pub salt: &'a str,
    /// The raw digest bytes.
    pub digest: Vec<u8>,
}

/// Stateless codec for the Argon2id encoded-hash text format.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashCodec;

impl HashCodec {
    /// Encodes `password` into the stable hash text format.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::InvalidInput`] if `salt` is empty or
    /// contains the field delimiter, and [`CredentialError::Kdf`] if the
    /// cost parameters are rejected by the key-derivation function.
    pub fn encode(
        password: &str,
        salt: &str,
        params: &HashParams,
    ) -> Result<String, CredentialError> {
        Self::encode_with(
            password,
            salt,
            params.time_cost,
            params.memory_cost,
            params.parallelism,
            DIGEST_LENGTH,
        )
    }

    /// Encodes with explicit cost parameters and digest length.
    ///
    /// Used by [`verify`] to reproduce a hash under the exact parameters
    /// extracted from a stored value.
    ///
    /// [`verify`]: Self::verify
    fn encode_with(
        password: &str,
        salt: &str,
        time_cost: u32,
        memory_cost: u32,
        parallelism: u32,
        digest_length: usize,
    ) -> Result<String, CredentialError> {
        if salt.is_empty() || salt.contains(FIELD_DELIMITER) {
            return Err(CredentialError::invalid_input(
                "salt must be non-empty and cannot contain '$'",
            ));
        }

        let digest = Self::derive(password, salt, time_cost, memory_cost, parallelism, digest_length)?;

        Ok(format!(
            "{ALGORITHM_TAG}$v={ARGON2_VERSION}$m={memory_cost},t={time_cost},p={parallelism}${salt}${}",
            BASE64.encode(digest)
        ))
    }

    /// Parses an encoded hash back into its fields.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::MalformedHash`] if the field count,
    /// algorithm tag, version or parameter block does not match the
    /// expected shape.
    pub fn decode(encoded: &str) -> Result<DecodedHash<'_>, CredentialError> {
        let fields: Vec<&str> = encoded.split(FIELD_DELIMITER).collect();
        if fields.len() != FIELD_COUNT || fields[0] != ALGORITHM_TAG {
            return Err(CredentialError::MalformedHash);
        }

        let version: u32 = fields[1]
            .strip_prefix("v=")
            .and_then(|v| v.parse().ok())
            .ok_or(CredentialError::MalformedHash)?;
        if version != ARGON2_VERSION {
            return Err(CredentialError::MalformedHash);
        }

        let (memory_cost, time_cost, parallelism) = Self::parse_cost_params(fields[2])?;

        let salt = fields[3];
        if salt.is_empty() {
            return Err(CredentialError::MalformedHash);
        }

        let digest = BASE64
            .decode(fields[4])
            .map_err(|_| CredentialError::MalformedHash)?;
        if digest.is_empty() {
            return Err(CredentialError::MalformedHash);
        }

        Ok(DecodedHash {
            time_cost,
            memory_cost,
            parallelism,
            salt,
            digest,
        })
    }

    /// Verifies `password` against an encoded hash.
    ///
    /// The stored value is decoded, the password re-encoded under the
    /// extracted salt and cost parameters, and the two encoded strings
    /// compared byte-for-byte in constant time. Malformed or unusable
    /// stored values verify as `false`; this method never errors.
    pub fn verify(password: &str, encoded: &str) -> bool {
        let Ok(decoded) = Self::decode(encoded) else {
            return false;
        };

        let Ok(candidate) = Self::encode_with(
            password,
            decoded.salt,
            decoded.time_cost,
            decoded.memory_cost,
            decoded.parallelism,
            decoded.digest.len(),
        ) else {
            return false;
        };

        candidate.as_bytes().ct_eq(encoded.as_bytes()).into()
    }

    /// Returns whether a stored hash was produced under settings weaker
    /// than `current`.
    ///
    /// True if any cost parameter differs from `current`, or if the
    /// embedded salt carries less entropy than the configured target.
    /// A hash that does not decode is reported as due for rehash.
    pub fn needs_rehash(encoded: &str, current: &HashParams) -> bool {
        let Ok(decoded) = Self::decode(encoded) else {
            return true;
        };

        decoded.time_cost != current.time_cost
            || decoded.memory_cost != current.memory_cost
            || decoded.parallelism != current.parallelism
            || entropy_bits(decoded.salt.len(), ALPHANUMERIC.len())
                < f64::from(current.salt_entropy_bits)
    }

    /// Runs the Argon2id key-derivation function.
    fn derive(
        password: &str,
        salt: &str,
        time_cost: u32,
        memory_cost: u32,
        parallelism: u32,
        digest_length: usize,
    ) -> Result<Vec<u8>, CredentialError> {
        let params = Params::new(memory_cost, time_cost, parallelism, Some(digest_length))
            .map_err(CredentialError::Kdf)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut digest = vec![0u8; digest_length];
        argon2
            .hash_password_into(password.as_bytes(), salt.as_bytes(), &mut digest)
            .map_err(CredentialError::Kdf)?;

        Ok(digest)
    }

    /// Parses the `m=..,t=..,p=..` parameter block.
    fn parse_cost_params(block: &str) -> Result<(u32, u32, u32), CredentialError> {
        let parts: Vec<&str> = block.split(',').collect();
        let [memory, time, lanes] = parts.as_slice() else {
            return Err(CredentialError::MalformedHash);
        };

        let memory_cost = memory
            .strip_prefix("m=")
            .and_then(|v| v.parse().ok())
            .ok_or(CredentialError::MalformedHash)?;
        let time_cost = time
            .strip_prefix("t=")
            .and_then(|v| v.parse().ok())
            .ok_or(CredentialError::MalformedHash)?;
        let parallelism = lanes
            .strip_prefix("p=")
            .and_then(|v| v.parse().ok())
            .ok_or(CredentialError::MalformedHash)?;

        Ok((memory_cost, time_cost, parallelism))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cheap parameters so the test suite stays fast.
    fn test_params() -> HashParams {
        HashParams {
            time_cost: 1,
            memory_cost: 1024,
            parallelism: 1,
            salt_entropy_bits: 128,
        }
    }

    const SALT: &str = "mGbqYKKrGVtjsdHKTmYU5n";

    #[test]
    fn encode_then_verify_round_trips() -> anyhow::Result<()> {
        let encoded = HashCodec::encode("correct horse battery", SALT, &test_params())?;

        assert!(encoded.starts_with("argon2id$v=19$"));
        assert!(HashCodec::verify("correct horse battery", &encoded));
        assert!(!HashCodec::verify("correct horse staple", &encoded));

        Ok(())
    }

    #[test]
    fn encode_is_deterministic_for_fixed_salt() -> anyhow::Result<()> {
        let params = test_params();
        let first = HashCodec::encode("hunter2hunter2", SALT, &params)?;
        let second = HashCodec::encode("hunter2hunter2", SALT, &params)?;

        assert_eq!(first, second);

        Ok(())
    }

    #[test]
    fn encode_rejects_bad_salts() {
        let params = test_params();

        let empty = HashCodec::encode("password", "", &params);
        assert!(matches!(empty, Err(CredentialError::InvalidInput(_))));

        let delimited = HashCodec::encode("password", "bad$salt", &params);
        assert!(matches!(delimited, Err(CredentialError::InvalidInput(_))));
    }

    #[test]
    fn decode_recovers_salt_and_parameters() -> anyhow::Result<()> {
        let params = test_params();
        let encoded = HashCodec::encode("some password", SALT, &params)?;

        let decoded = HashCodec::decode(&encoded)?;
        assert_eq!(decoded.salt, SALT);
        assert_eq!(decoded.time_cost, params.time_cost);
        assert_eq!(decoded.memory_cost, params.memory_cost);
        assert_eq!(decoded.parallelism, params.parallelism);
        assert_eq!(decoded.digest.len(), 32);

        Ok(())
    }

    #[test]
    fn decode_rejects_wrong_shapes() {
        for malformed in [
            "",
            "plaintext",
            "md5$v=19$m=1024,t=1,p=1$salt$digest",
            "argon2id$v=18$m=1024,t=1,p=1$salt$AAAA",
            "argon2id$v=19$m=1024,t=1$salt$AAAA",
            "argon2id$v=19$m=1024,t=1,p=1$$AAAA",
            "argon2id$v=19$m=1024,t=1,p=1$salt",
            "argon2id$v=19$m=1024,t=1,p=1$salt$not~base64",
            "argon2id$v=19$m=1024,t=1,p=1$salt$AAAA$extra",
        ] {
            let result = HashCodec::decode(malformed);
            assert!(
                matches!(result, Err(CredentialError::MalformedHash)),
                "expected malformed: {malformed:?}"
            );
        }
    }

    #[test]
    fn verify_is_false_for_malformed_input() {
        assert!(!HashCodec::verify("password", ""));
        assert!(!HashCodec::verify("password", "not-a-hash"));
        assert!(!HashCodec::verify("password", "argon2id$v=19$m=x,t=1,p=1$s$AAAA"));
    }

    #[test]
    fn needs_rehash_detects_parameter_drift() -> anyhow::Result<()> {
        let old = test_params();
        let encoded = HashCodec::encode("a strong password", SALT, &old)?;

        assert!(!HashCodec::needs_rehash(&encoded, &old));

        let stronger = HashParams {
            time_cost: 2,
            ..old
        };
        assert!(HashCodec::needs_rehash(&encoded, &stronger));

        Ok(())
    }

    #[test]
    fn needs_rehash_detects_weak_salt() -> anyhow::Result<()> {
        let params = test_params();

        // 8 characters of alphanumeric salt carry under 48 bits of entropy,
        // well below the 128-bit target.
        let encoded = HashCodec::encode("a strong password", "shortsal", &params)?;
        assert!(HashCodec::needs_rehash(&encoded, &params));

        Ok(())
    }

    #[test]
    fn needs_rehash_is_true_for_malformed_input() {
        assert!(HashCodec::needs_rehash("garbage", &test_params()));
    }
}

//! Credential facade over the hash codec and token generator.

use crate::TRACING_TARGET_CREDENTIAL as TRACING_TARGET;
use crate::codec::HashCodec;
use crate::error::CredentialError;
use crate::params::HashParams;
use crate::token::{ALPHANUMERIC, TokenGenerator};

/// Prefix of a stored value that marks an account as having no password.
///
/// The prefix can never appear in the codec's real output, so a sentinel
/// value always fails verification.
pub const UNUSABLE_PASSWORD_PREFIX: &str = "!";

/// Number of random filler characters appended after the unusable prefix.
///
/// The filler keeps sentinel values distinct from each other so that two
/// "no password" accounts never share a stored value.
const UNUSABLE_PASSWORD_SUFFIX_LENGTH: usize = 40;

/// Facade for creating, checking and upgrading password credentials.
///
/// Constructed once at process start with the deployment's cost parameters
/// and handed by clone to every consumer; hashing itself is synchronous and
/// memory-hard, so callers on latency-sensitive paths should run it on a
/// blocking worker.
#[derive(Debug, Clone)]
#[must_use = "credential services do nothing unless you call them"]
pub struct CredentialService {
    params: HashParams,
    tokens: TokenGenerator,
}

impl CredentialService {
    /// Creates a new instance of a [`CredentialService`].
    #[inline]
    pub fn new(params: HashParams) -> Self {
        Self {
            params,
            tokens: TokenGenerator::new(),
        }
    }

    /// Returns the active cost parameters.
    #[inline]
    pub const fn params(&self) -> &HashParams {
        &self.params
    }

    /// Returns a sentinel value representing "no password set".
    ///
    /// The sentinel is the reserved prefix followed by fixed-length random
    /// filler; [`is_usable`] reports it as unusable and [`check`] always
    /// fails against it.
    ///
    /// [`is_usable`]: Self::is_usable
    /// [`check`]: Self::check
    pub fn make_unusable(&self) -> String {
        let filler = self
            .tokens
            .generate(UNUSABLE_PASSWORD_SUFFIX_LENGTH, ALPHANUMERIC);
        format!("{UNUSABLE_PASSWORD_PREFIX}{filler}")
    }

    /// Returns whether a stored value is a real, verifiable hash.
    ///
    /// Absent values and values carrying the unusable prefix are not.
    pub fn is_usable(&self, encoded: Option<&str>) -> bool {
        encoded.is_some_and(|value| !value.starts_with(UNUSABLE_PASSWORD_PREFIX))
    }

    /// Turns a plaintext password into a storable hash.
    ///
    /// An absent password yields the unusable sentinel. When no salt is
    /// supplied, a fresh one is generated at the configured entropy target.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError`] if an explicitly supplied salt is
    /// malformed or the key-derivation function rejects its inputs.
    pub fn make(
        &self,
        password: Option<&str>,
        salt: Option<&str>,
    ) -> Result<String, CredentialError> {
        let Some(password) = password else {
            tracing::debug!(target: TRACING_TARGET, "storing unusable password sentinel");
            return Ok(self.make_unusable());
        };

        let generated;
        let salt = match salt {
            Some(salt) => salt,
            None => {
                generated = self
                    .tokens
                    .salt_with_entropy(self.params.salt_entropy_bits, ALPHANUMERIC);
                &generated
            }
        };

        HashCodec::encode(password, salt, &self.params)
    }

    /// Verifies a plaintext password against a stored value.
    ///
    /// Returns `false` without attempting a decode when the password is
    /// absent or the stored value is unusable, keeping the "no password"
    /// and "wrong password" paths indistinguishable to the caller.
    pub fn check(&self, password: Option<&str>, encoded: &str) -> bool {
        let Some(password) = password else {
            return false;
        };
        if !self.is_usable(Some(encoded)) {
            return false;
        }

        HashCodec::verify(password, encoded)
    }

    /// Returns whether a stored hash should be re-created under the
    /// currently configured parameters.
    ///
    /// Unusable sentinels are never reported for update; there is no
    /// credential to upgrade.
    pub fn must_update(&self, encoded: &str) -> bool {
        if !self.is_usable(Some(encoded)) {
            return false;
        }

        let stale = HashCodec::needs_rehash(encoded, &self.params);
        if stale {
            tracing::debug!(
                target: TRACING_TARGET,
                "stored hash is stale and should be re-created"
            );
        }

        stale
    }
}

impl Default for CredentialService {
    #[inline]
    fn default() -> Self {
        Self::new(HashParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cheap parameters so the test suite stays fast.
    fn test_service() -> CredentialService {
        CredentialService::new(HashParams {
            time_cost: 1,
            memory_cost: 1024,
            parallelism: 1,
            salt_entropy_bits: 128,
        })
    }

    #[test]
    fn make_and_check_round_trips() -> anyhow::Result<()> {
        let credentials = test_service();
        let encoded = credentials.make(Some("correct horse battery"), None)?;

        assert!(credentials.is_usable(Some(&encoded)));
        assert!(credentials.check(Some("correct horse battery"), &encoded));
        assert!(!credentials.check(Some("wrong password"), &encoded));

        Ok(())
    }

    #[test]
    fn make_generates_unique_salts() -> anyhow::Result<()> {
        let credentials = test_service();

        let first = credentials.make(Some("same password"), None)?;
        let second = credentials.make(Some("same password"), None)?;

        assert_ne!(first, second);
        assert!(credentials.check(Some("same password"), &first));
        assert!(credentials.check(Some("same password"), &second));

        Ok(())
    }

    #[test]
    fn absent_password_yields_unusable_sentinel() -> anyhow::Result<()> {
        let credentials = test_service();
        let sentinel = credentials.make(None, None)?;

        assert!(sentinel.starts_with(UNUSABLE_PASSWORD_PREFIX));
        assert_eq!(sentinel.len(), 41);
        assert!(!credentials.is_usable(Some(&sentinel)));
        assert!(!credentials.check(Some("anything"), &sentinel));
        assert!(!credentials.check(None, &sentinel));

        Ok(())
    }

    #[test]
    fn sentinels_are_distinct() {
        let credentials = test_service();

        assert_ne!(credentials.make_unusable(), credentials.make_unusable());
    }

    #[test]
    fn absent_stored_value_is_not_usable() {
        let credentials = test_service();

        assert!(!credentials.is_usable(None));
    }

    #[test]
    fn check_with_absent_password_is_false() -> anyhow::Result<()> {
        let credentials = test_service();
        let encoded = credentials.make(Some("a real password"), None)?;

        assert!(!credentials.check(None, &encoded));

        Ok(())
    }

    #[test]
    fn must_update_tracks_current_parameters() -> anyhow::Result<()> {
        let credentials = test_service();
        let encoded = credentials.make(Some("a real password"), None)?;

        assert!(!credentials.must_update(&encoded));

        let upgraded = CredentialService::new(HashParams {
            memory_cost: 2048,
            ..*credentials.params()
        });
        assert!(upgraded.must_update(&encoded));
        // The old hash still verifies under the upgraded service.
        assert!(upgraded.check(Some("a real password"), &encoded));

        Ok(())
    }

    #[test]
    fn must_update_flags_weak_salts() -> anyhow::Result<()> {
        let credentials = test_service();
        let encoded = credentials.make(Some("a real password"), Some("shortsal"))?;

        assert!(credentials.must_update(&encoded));

        Ok(())
    }

    #[test]
    fn must_update_ignores_sentinels() {
        let credentials = test_service();
        let sentinel = credentials.make_unusable();

        assert!(!credentials.must_update(&sentinel));
    }
}

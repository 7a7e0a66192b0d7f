//! Password strength validation pipeline.
//!
//! Four checks run in a fixed order, first failure wins: length bounds,
//! not-entirely-numeric, similarity to the user's own attributes, and
//! membership in the common-password list. The ordering is part of the
//! observable contract; error messages for a given input are stable.

use std::collections::HashMap;

use crate::TRACING_TARGET_STRENGTH as TRACING_TARGET;
use crate::error::InvalidPasswordError;
use crate::wordlist::CommonPasswordList;

/// Policy bounds for the strength pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
#[must_use = "policies do nothing unless used by a validator"]
pub struct PasswordPolicy {
    /// Minimum password length in characters.
    pub min_length: usize,
    /// Maximum password length in characters.
    pub max_length: usize,
    /// Similarity ratio at or above which a password is rejected as too
    /// close to a user attribute. Must be at least 0.1.
    pub max_similarity: f64,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 9,
            max_length: 128,
            max_similarity: 0.7,
        }
    }
}

/// User attributes a password is compared against.
///
/// A transient, per-call view; absent attributes are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserAttributes<'a> {
    /// The account's username.
    pub username: Option<&'a str>,
    /// The account's email address.
    pub email: Option<&'a str>,
    /// The account's first name.
    pub first_name: Option<&'a str>,
    /// The account's last name.
    pub last_name: Option<&'a str>,
}

impl<'a> UserAttributes<'a> {
    /// Returns the present attributes as `(name, value)` pairs.
    fn iter(&self) -> impl Iterator<Item = (&'static str, &'a str)> {
        [
            ("username", self.username),
            ("email", self.email),
            ("first name", self.first_name),
            ("last name", self.last_name),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

/// Password strength validator.
///
/// Holds the policy bounds and a handle to the shared common-password
/// list; cheap to clone.
#[derive(Debug, Clone, Default)]
#[must_use = "validators do nothing unless you validate with them"]
pub struct PasswordStrength {
    policy: PasswordPolicy,
    common: CommonPasswordList,
}

impl PasswordStrength {
    /// Creates a new instance of a [`PasswordStrength`] validator.
    #[inline]
    pub fn new(common: CommonPasswordList) -> Self {
        Self {
            policy: PasswordPolicy::default(),
            common,
        }
    }

    /// Creates a validator with custom policy bounds.
    #[inline]
    pub fn with_policy(policy: PasswordPolicy, common: CommonPasswordList) -> Self {
        Self { policy, common }
    }

    /// Returns the active policy.
    #[inline]
    pub const fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Runs the full validation pipeline.
    ///
    /// # Errors
    ///
    /// Returns the [`InvalidPasswordError`] of the first failing stage.
    pub fn validate(
        &self,
        password: &str,
        attributes: &UserAttributes<'_>,
    ) -> Result<(), InvalidPasswordError> {
        let result = self
            .check_length(password)
            .and_then(|()| Self::check_not_numeric(password))
            .and_then(|()| self.check_not_similar(password, attributes))
            .and_then(|()| self.check_not_common(password));

        if let Err(ref error) = result {
            tracing::debug!(
                target: TRACING_TARGET,
                reason = %error.reason(),
                "password rejected by strength pipeline"
            );
        }

        result
    }

    /// Returns whether `password` passes the pipeline, without the reason.
    pub fn is_acceptable(&self, password: &str, attributes: &UserAttributes<'_>) -> bool {
        self.validate(password, attributes).is_ok()
    }

    fn check_length(&self, password: &str) -> Result<(), InvalidPasswordError> {
        let length = password.chars().count();
        if length < self.policy.min_length {
            return Err(InvalidPasswordError::TooShort {
                min: self.policy.min_length,
            });
        }
        if length > self.policy.max_length {
            return Err(InvalidPasswordError::TooLong {
                max: self.policy.max_length,
            });
        }
        Ok(())
    }

    fn check_not_numeric(password: &str) -> Result<(), InvalidPasswordError> {
        if !password.is_empty() && password.chars().all(|c| c.is_ascii_digit()) {
            return Err(InvalidPasswordError::EntirelyNumeric);
        }
        Ok(())
    }

    /// Compares the password against every attribute value and each of its
    /// word-parts, case-insensitively.
    fn check_not_similar(
        &self,
        password: &str,
        attributes: &UserAttributes<'_>,
    ) -> Result<(), InvalidPasswordError> {
        let password = password.to_lowercase();

        for (name, value) in attributes.iter() {
            if value.is_empty() {
                continue;
            }

            let value = value.to_lowercase();
            let mut parts: Vec<&str> = value
                .split(|c: char| !(c.is_alphanumeric() || c == '_'))
                .filter(|part| !part.is_empty())
                .collect();
            parts.push(value.as_str());

            for part in parts {
                if exceeds_maximum_length_ratio(&password, self.policy.max_similarity, part) {
                    continue;
                }
                if quick_ratio(&password, part) >= self.policy.max_similarity {
                    return Err(InvalidPasswordError::TooSimilar { attribute: name });
                }
            }
        }

        Ok(())
    }

    fn check_not_common(&self, password: &str) -> Result<(), InvalidPasswordError> {
        if self.common.contains(password) {
            return Err(InvalidPasswordError::TooCommon);
        }
        Ok(())
    }
}

/// Returns whether `value` is so much shorter than `password` that the
/// similarity ratio cannot reach `max_similarity`.
///
/// The quick ratio of two strings decays as roughly `2 / length_ratio`, so
/// once the password is at least ten times longer than the candidate part
/// and the part stays under `max_similarity / 2 * password_length`, the
/// expensive comparison is provably below threshold and can be skipped.
fn exceeds_maximum_length_ratio(password: &str, max_similarity: f64, value: &str) -> bool {
    let password_length = password.chars().count();
    let value_length = value.chars().count();
    let length_bound_similarity = max_similarity / 2.0 * password_length as f64;

    password_length >= 10 * value_length && (value_length as f64) < length_bound_similarity
}

/// Upper-bound similarity ratio of two strings: twice the number of
/// characters they share (counted with multiplicity) over their combined
/// length. Equal strings score 1.0, disjoint strings 0.0.
fn quick_ratio(a: &str, b: &str) -> f64 {
    let mut available: HashMap<char, i64> = HashMap::new();
    for ch in b.chars() {
        *available.entry(ch).or_insert(0) += 1;
    }

    let mut matches = 0i64;
    let mut length_a = 0usize;
    for ch in a.chars() {
        length_a += 1;
        let count = available.entry(ch).or_insert(0);
        if *count > 0 {
            matches += 1;
        }
        *count -= 1;
    }

    let total = length_a + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PasswordWeakness;

    fn validator() -> PasswordStrength {
        PasswordStrength::new(CommonPasswordList::new())
    }

    fn no_attributes() -> UserAttributes<'static> {
        UserAttributes::default()
    }

    #[test]
    fn accepts_a_strong_password() {
        let result = validator().validate("Xk9#mQ2vL!pZ8", &no_attributes());
        assert!(result.is_ok());
    }

    #[test]
    fn rejects_short_passwords() {
        let error = validator()
            .validate("ab", &no_attributes())
            .expect_err("too short");
        assert_eq!(error, InvalidPasswordError::TooShort { min: 9 });
    }

    #[test]
    fn rejects_overlong_passwords() {
        let long = "a1!".repeat(50);
        let error = validator()
            .validate(&long, &no_attributes())
            .expect_err("too long");
        assert_eq!(error, InvalidPasswordError::TooLong { max: 128 });
    }

    #[test]
    fn rejects_entirely_numeric_passwords() {
        let error = validator()
            .validate("1029384756", &no_attributes())
            .expect_err("numeric");
        assert_eq!(error.reason(), PasswordWeakness::EntirelyNumeric);
    }

    #[test]
    fn length_check_runs_before_numeric_check() {
        // "123456" fails both stages; the pipeline order makes length win.
        let error = validator()
            .validate("123456", &no_attributes())
            .expect_err("short and numeric");
        assert_eq!(error.reason(), PasswordWeakness::TooShort);
    }

    #[test]
    fn numeric_check_fires_under_relaxed_minimum() {
        let policy = PasswordPolicy {
            min_length: 6,
            ..PasswordPolicy::default()
        };
        let validator = PasswordStrength::with_policy(policy, CommonPasswordList::new());

        let error = validator
            .validate("123456", &no_attributes())
            .expect_err("numeric");
        assert_eq!(error.reason(), PasswordWeakness::EntirelyNumeric);
    }

    #[test]
    fn numeric_check_fires_at_valid_length() {
        let error = validator()
            .validate("1234567890123", &no_attributes())
            .expect_err("numeric");
        assert_eq!(error.reason(), PasswordWeakness::EntirelyNumeric);
    }

    #[test]
    fn rejects_password_equal_to_username() {
        let attributes = UserAttributes {
            username: Some("SnowBall99x"),
            ..Default::default()
        };

        let error = validator()
            .validate("snowball99x", &attributes)
            .expect_err("same as username");
        assert_eq!(
            error,
            InvalidPasswordError::TooSimilar {
                attribute: "username"
            }
        );
    }

    #[test]
    fn rejects_password_similar_to_email_local_part() {
        let attributes = UserAttributes {
            email: Some("maria.gonzalez@example.com"),
            ..Default::default()
        };

        let error = validator()
            .validate("mariagonzalez", &attributes)
            .expect_err("similar to email");
        assert_eq!(error.reason(), PasswordWeakness::TooSimilar);
    }

    #[test]
    fn accepts_password_unrelated_to_attributes() {
        let attributes = UserAttributes {
            username: Some("snowball99"),
            email: Some("maria@example.com"),
            first_name: Some("Maria"),
            last_name: Some("Gonzalez"),
        };

        assert!(validator().is_acceptable("Xk9#mQ2vL!pZ8", &attributes));
    }

    #[test]
    fn length_ratio_bound_skips_tiny_parts() {
        // A 40-character password against a 2-character part: the bound
        // proves similarity cannot reach 0.7, so the stage passes without
        // the expensive comparison.
        let attributes = UserAttributes {
            first_name: Some("Jo"),
            ..Default::default()
        };
        let password = "jXo4!vQm9zR2pL8wYb5tKc1nHd6gFs3aEu7iOq0j";

        assert!(validator().is_acceptable(password, &attributes));
    }

    #[test]
    fn rejects_common_passwords() {
        let error = validator()
            .validate("sunshine123", &no_attributes())
            .expect_err("common");
        assert_eq!(error, InvalidPasswordError::TooCommon);
    }

    #[test]
    fn common_check_is_case_insensitive() {
        let error = validator()
            .validate("SunShine123", &no_attributes())
            .expect_err("common");
        assert_eq!(error.reason(), PasswordWeakness::TooCommon);
    }

    #[test]
    fn similarity_check_runs_before_common_check() {
        // "password1" is both common and equal to a username here; the
        // pipeline order makes similarity win.
        let attributes = UserAttributes {
            username: Some("password1"),
            ..Default::default()
        };

        let error = validator()
            .validate("password1", &attributes)
            .expect_err("similar and common");
        assert_eq!(error.reason(), PasswordWeakness::TooSimilar);
    }

    #[test]
    fn quick_ratio_bounds() {
        assert_eq!(quick_ratio("abc", "abc"), 1.0);
        assert_eq!(quick_ratio("abc", "xyz"), 0.0);
        assert!((quick_ratio("abcd", "abxy") - 0.5).abs() < f64::EPSILON);
        assert_eq!(quick_ratio("", ""), 1.0);
    }

    #[test]
    fn custom_policy_bounds_are_honored() {
        let policy = PasswordPolicy {
            min_length: 4,
            max_length: 8,
            max_similarity: 0.7,
        };
        let validator = PasswordStrength::with_policy(policy, CommonPasswordList::new());

        assert!(validator.is_acceptable("vX7!q", &no_attributes()));
        let error = validator
            .validate("vX7!qvX7!q", &no_attributes())
            .expect_err("too long");
        assert_eq!(error, InvalidPasswordError::TooLong { max: 8 });
    }
}

//! Cryptographically secure random string generation.

use rand::Rng;

/// The 62-character alphanumeric alphabet used for salts and filler tokens.
///
/// Each character drawn from this alphabet contributes `log2(62) ~= 5.95`
/// bits of entropy.
pub const ALPHANUMERIC: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default entropy target for generated salts, in bits.
pub const DEFAULT_SALT_ENTROPY_BITS: u32 = 128;

/// Returns the entropy in bits of a string of `length` characters drawn
/// uniformly from an alphabet of `alphabet_size` characters.
#[inline]
pub fn entropy_bits(length: usize, alphabet_size: usize) -> f64 {
    length as f64 * (alphabet_size as f64).log2()
}

/// Generator for cryptographically secure random strings.
///
/// All output is drawn from the thread-local OS-seeded CSPRNG; a
/// non-cryptographic generator is never used.
#[derive(Debug, Clone, Copy, Default)]
#[must_use = "generators do nothing unless you draw from them"]
pub struct TokenGenerator;

impl TokenGenerator {
    /// Creates a new instance of a [`TokenGenerator`].
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Returns a random string of exactly `length` characters, each drawn
    /// uniformly and independently from `alphabet`.
    ///
    /// `length` must be positive and `alphabet` non-empty; both are
    /// caller-guaranteed preconditions.
    pub fn generate(&self, length: usize, alphabet: &[u8]) -> String {
        debug_assert!(length > 0, "token length must be positive");
        debug_assert!(!alphabet.is_empty(), "alphabet must not be empty");

        let mut rng = rand::rng();
        (0..length)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())] as char)
            .collect()
    }

    /// Returns a salt with at least `target_entropy_bits` bits of entropy.
    ///
    /// The salt length is the minimal integer `n` such that
    /// `n * log2(|alphabet|) >= target_entropy_bits`.
    pub fn salt_with_entropy(&self, target_entropy_bits: u32, alphabet: &[u8]) -> String {
        let bits_per_char = (alphabet.len() as f64).log2();
        let length = (f64::from(target_entropy_bits) / bits_per_char).ceil() as usize;
        self.generate(length, alphabet)
    }

    /// Returns an alphanumeric salt with the default 128-bit entropy target.
    #[inline]
    pub fn generate_salt(&self) -> String {
        self.salt_with_entropy(DEFAULT_SALT_ENTROPY_BITS, ALPHANUMERIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_respects_length_and_alphabet() {
        let tokens = TokenGenerator::new();
        let value = tokens.generate(22, ALPHANUMERIC);

        assert_eq!(value.chars().count(), 22);
        assert!(value.bytes().all(|b| ALPHANUMERIC.contains(&b)));
    }

    #[test]
    fn generate_is_not_repeating() {
        let tokens = TokenGenerator::new();

        let first = tokens.generate(22, ALPHANUMERIC);
        let second = tokens.generate(22, ALPHANUMERIC);

        assert_ne!(first, second);
    }

    #[test]
    fn generate_with_narrow_alphabet() {
        let tokens = TokenGenerator::new();
        let value = tokens.generate(64, b"ab");

        assert_eq!(value.len(), 64);
        assert!(value.chars().all(|c| c == 'a' || c == 'b'));
    }

    #[test]
    fn salt_length_is_minimal_for_target_entropy() {
        let tokens = TokenGenerator::new();

        // 128 bits over a 62-character alphabet needs ceil(128 / 5.954) = 22.
        let salt = tokens.generate_salt();
        assert_eq!(salt.len(), 22);

        // 64 bits over the same alphabet needs ceil(64 / 5.954) = 11.
        let salt = tokens.salt_with_entropy(64, ALPHANUMERIC);
        assert_eq!(salt.len(), 11);
    }

    #[test]
    fn entropy_of_generated_salt_meets_target() {
        let tokens = TokenGenerator::new();
        let salt = tokens.generate_salt();

        assert!(entropy_bits(salt.len(), ALPHANUMERIC.len()) >= 128.0);
    }
}

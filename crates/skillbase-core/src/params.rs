//! Process-wide cost parameters for password hashing.

use serde::{Deserialize, Serialize};

/// Cost parameters for the Argon2id key-derivation function.
///
/// These are read at hash-creation time and compared against the parameters
/// embedded in stored hashes to decide staleness. Raising any of them in a
/// later deployment does not invalidate existing credentials; it only makes
/// [`needs_rehash`] report them as due for an upgrade.
///
/// [`needs_rehash`]: crate::HashCodec::needs_rehash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[must_use = "hash parameters do nothing unless passed to the codec"]
pub struct HashParams {
    /// Number of passes over the memory.
    pub time_cost: u32,
    /// Memory size in KiB.
    pub memory_cost: u32,
    /// Number of parallel lanes.
    pub parallelism: u32,
    /// Minimum entropy of an acceptable salt, in bits.
    pub salt_entropy_bits: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        Self {
            time_cost: 2,
            memory_cost: 102_400,
            parallelism: 8,
            salt_entropy_bits: 128,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters() {
        let params = HashParams::default();

        assert_eq!(params.time_cost, 2);
        assert_eq!(params.memory_cost, 102_400);
        assert_eq!(params.parallelism, 8);
        assert_eq!(params.salt_entropy_bits, 128);
    }
}

//! Lazily inflated set of known common passwords.

use std::collections::HashSet;
use std::io::Read;
use std::sync::{Arc, OnceLock};

use flate2::read::GzDecoder;

use crate::TRACING_TARGET_WORDLIST as TRACING_TARGET;

/// Embedded gzip-compressed word list (~20k entries, one per line,
/// lowercase).
const COMPRESSED_WORDLIST: &[u8] = include_bytes!("../data/common-passwords.txt.gz");

/// Shared, lazily loaded set of known common passwords.
///
/// The backing list ships compressed inside the binary and is inflated at
/// most once per process, on the first membership check; clones share the
/// same underlying set, and concurrent first use performs exactly one load.
/// Read-only after initialization.
#[derive(Debug, Clone, Default)]
#[must_use = "the list does nothing unless queried"]
pub struct CommonPasswordList {
    entries: Arc<OnceLock<HashSet<String>>>,
}

impl CommonPasswordList {
    /// Creates a new instance of a [`CommonPasswordList`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the lowercased, trimmed `password` is a member of
    /// the common-password list.
    pub fn contains(&self, password: &str) -> bool {
        let needle = password.trim().to_lowercase();
        self.entries().contains(needle.as_str())
    }

    /// Returns the number of loaded entries, inflating the list if needed.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Returns whether the loaded list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Returns the loaded set, inflating the embedded list on first use.
    fn entries(&self) -> &HashSet<String> {
        self.entries.get_or_init(|| {
            let mut text = String::new();
            let mut decoder = GzDecoder::new(COMPRESSED_WORDLIST);
            if let Err(error) = decoder.read_to_string(&mut text) {
                // An unreadable embedded list leaves this stage inert.
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "failed to inflate the common password list"
                );
                return HashSet::new();
            }

            let entries: HashSet<String> = text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect();

            tracing::debug!(
                target: TRACING_TARGET,
                entries = entries.len(),
                "common password list loaded"
            );

            entries
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_well_known_passwords() {
        let list = CommonPasswordList::new();

        assert!(list.contains("123456"));
        assert!(list.contains("password"));
        assert!(list.contains("qwerty"));
    }

    #[test]
    fn membership_is_case_insensitive_and_trimmed() {
        let list = CommonPasswordList::new();

        assert!(list.contains("PassWord"));
        assert!(list.contains("  password  "));
    }

    #[test]
    fn does_not_contain_random_strings() {
        let list = CommonPasswordList::new();

        assert!(!list.contains("Xk9#mQ2vL!pZ8"));
    }

    #[test]
    fn list_has_expected_scale() {
        let list = CommonPasswordList::new();

        assert!(list.len() > 10_000);
    }

    #[test]
    fn concurrent_first_use_loads_once() {
        let list = CommonPasswordList::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let list = list.clone();
                std::thread::spawn(move || list.contains("123456"))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().expect("loader thread panicked"));
        }

        // All callers observed the same fully populated set.
        let loaded = list.entries.get().expect("list not initialized");
        assert!(loaded.len() > 10_000);
    }

    #[test]
    fn clones_share_one_load() {
        let list = CommonPasswordList::new();
        let clone = list.clone();

        assert!(clone.contains("123456"));
        // The original observes the set loaded through the clone.
        assert!(list.entries.get().is_some());
    }
}

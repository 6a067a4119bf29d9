//! [`Keyring`]: process-wide memoisation of the derived field key.
//!
//! Derivation runs 100k PBKDF2 rounds and the secret never changes at
//! runtime, so deriving once per process is the expected pattern. Correctness
//! never depends on the cache — derivation is deterministic, and a caller
//! that derives per operation only pays in CPU.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::kdf::{derive_key, KdfError, KeyHandle};

/// Thread-safe cache for the derived [`KeyHandle`].
///
/// Reads are lock-free ([`arc_swap`]); the only write happens on first use.
/// Two threads racing on a cold cache both derive, but deterministically
/// produce equal keys, so last-write-wins is harmless.
#[derive(Debug, Default)]
pub struct Keyring {
    inner: ArcSwapOption<KeyHandle>,
}

impl Keyring {
    /// Create a new, empty [`Keyring`].
    pub fn new() -> Self {
        Self {
            inner: ArcSwapOption::empty(),
        }
    }

    /// Returns `true` if a key has already been derived and cached.
    pub fn is_ready(&self) -> bool {
        self.inner.load().is_some()
    }

    /// Return the cached key handle, deriving it from `secret` on first use.
    ///
    /// # Errors
    ///
    /// Returns [`KdfError::EmptySecret`] if the cache is cold and `secret` is
    /// blank.
    pub fn get_or_derive(&self, secret: &str) -> Result<Arc<KeyHandle>, KdfError> {
        if let Some(key) = self.inner.load_full() {
            return Ok(key);
        }
        let key = Arc::new(derive_key(secret)?);
        self.inner.store(Some(Arc::clone(&key)));
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initially_not_ready() {
        let ring = Keyring::new();
        assert!(!ring.is_ready());
    }

    #[test]
    fn derives_once_then_reuses() {
        let ring = Keyring::new();
        let k1 = ring.get_or_derive("s3cr3t").unwrap();
        assert!(ring.is_ready());
        let k2 = ring.get_or_derive("ignored once warm").unwrap();
        assert!(Arc::ptr_eq(&k1, &k2));
    }

    #[test]
    fn blank_secret_on_cold_cache_errors() {
        let ring = Keyring::new();
        assert!(ring.get_or_derive("").is_err());
        assert!(!ring.is_ready());
    }
}

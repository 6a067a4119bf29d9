//! Key derivation: turns the operator-supplied secret into a reusable
//! 256-bit key handle.
//!
//! PBKDF2-HMAC-SHA256 with a deliberately high iteration count, so that
//! brute-forcing the application secret from leaked key material is
//! infeasible. Derivation is fully deterministic — the same secret always
//! yields the same key — because ciphertext written under one derivation must
//! remain decryptable later without ever persisting the key itself.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use thiserror::Error;

/// Byte length of a derived AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count. Tunable cost parameter; raising it invalidates
/// nothing since the salt and algorithm stay fixed.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Fixed, non-secret salt. Its only job is to bind derived keys to this
/// subsystem so the same secret used elsewhere never yields the same key.
const FIELD_KEY_SALT: &[u8] = b"medivault.field-encryption.v1";

/// Errors produced by the key-derivation layer.
#[derive(Debug, Error)]
pub enum KdfError {
    /// The supplied secret is empty or blank — a deployment error.
    #[error("encryption secret is empty")]
    EmptySecret,
}

/// Fixed-size buffer holding exactly [`KEY_LEN`] bytes of derived key
/// material.
///
/// Opaque outside this crate: only the cipher layer reads the bytes. When the
/// handle is dropped, the memory is overwritten with zeroes to minimise the
/// window during which key material lives in RAM.
#[derive(Clone)]
pub struct KeyHandle(Box<[u8; KEY_LEN]>);

impl KeyHandle {
    /// Borrow the raw key bytes. Crate-private: callers outside the crypto
    /// layer never see key material.
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for KeyHandle {
    fn drop(&mut self) {
        // Zero the key material on drop.
        self.0.iter_mut().for_each(|b| *b = 0);
    }
}

impl std::fmt::Debug for KeyHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("KeyHandle([REDACTED])")
    }
}

/// Derive the field-encryption key from the operator secret.
///
/// CPU-bound and deliberately slow ([`PBKDF2_ITERATIONS`] rounds); callers
/// performing many operations should derive once and reuse the handle, e.g.
/// via [`crate::keyring::Keyring`].
///
/// # Errors
///
/// Returns [`KdfError::EmptySecret`] if `secret` is empty or whitespace-only.
/// A blank secret is a configuration error that must surface to the operator,
/// never a key silently derived from `""`.
pub fn derive_key(secret: &str) -> Result<KeyHandle, KdfError> {
    if secret.trim().is_empty() {
        return Err(KdfError::EmptySecret);
    }
    let mut buf = Box::new([0u8; KEY_LEN]);
    pbkdf2_hmac::<Sha256>(
        secret.as_bytes(),
        FIELD_KEY_SALT,
        PBKDF2_ITERATIONS,
        &mut buf[..],
    );
    Ok(KeyHandle(buf))
}

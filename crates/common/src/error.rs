//! Common error types shared across crates.

use thiserror::Error;

/// Top-level error type consumed by portal collaborators (persistence and
/// API layers).
///
/// Variants map to the failure taxonomy of the field-encryption core:
/// - [`VaultError::Configuration`] — deployment error, fatal at startup.
/// - [`VaultError::Authentication`] — AEAD tag verification failed: wrong key
///   or tampered/corrupted ciphertext. Never downgraded to a fallback value.
/// - [`VaultError::FormatMismatch`] — input does not have the shape of packed
///   ciphertext. For the compatibility read path this triggers graceful
///   fallback rather than an error; it is a hard error only when the caller
///   asserted the input was ciphertext (e.g. direct `unpack`).
#[derive(Debug, Error)]
pub enum VaultError {
    /// The encryption secret is missing or blank.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Authenticated decryption failed — wrong key or tampered ciphertext.
    #[error("authentication failure: {0}")]
    Authentication(String),

    /// The stored value does not look like packed ciphertext.
    #[error("format mismatch: {0}")]
    FormatMismatch(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VaultError {
    /// Returns the short machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            VaultError::Configuration(_) => "configuration_error",
            VaultError::Authentication(_) => "authentication_failure",
            VaultError::FormatMismatch(_) => "format_mismatch",
            VaultError::Internal(_) => "internal_error",
        }
    }
}

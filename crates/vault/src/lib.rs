//! `vault` — field-level encryption and searchable-hash core of the
//! medivault portal.
//!
//! Protects PII and medical fields (names, national ID numbers, phone
//! numbers, blood type, free-text notes) at rest while keeping equality
//! lookups possible without decryption. Everything else in the portal —
//! persistence, HTTP handlers, presentation — is a collaborator calling
//! through this crate's functions.
//!
//! Write path: plaintext → [`kdf::derive_key`] → [`crypto::cipher`]
//! (ciphertext + fresh nonce), plus [`search::lookup_hash`] for fields that
//! need equality lookup; both handed to the persistence collaborator.
//!
//! Read path: stored value → [`compat::safe_decrypt`], which classifies the
//! three coexisting generations of data (real ciphertext, seed placeholders,
//! pre-encryption plaintext) and only runs the cipher on the first.
//!
//! All operations are pure functions over their arguments: no I/O, no shared
//! mutable state, safe to call concurrently. The single expensive step is
//! key derivation; [`keyring::Keyring`] memoises it per process.

pub mod compat;
pub mod config;
pub mod crypto;
pub mod kdf;
pub mod keyring;
pub mod mask;
pub mod search;

pub use common::VaultError;

pub use compat::{classify, safe_decrypt, StoredField};
pub use config::Config;
pub use crypto::cipher::{
    decrypt_field, decrypt_split, encrypt_field, encrypt_split, pack, unpack, CipherError,
    EncryptedField,
};
pub use kdf::{derive_key, KdfError, KeyHandle};
pub use keyring::Keyring;
pub use mask::{mask, mask_default};
pub use search::lookup_hash;

impl From<KdfError> for VaultError {
    fn from(e: KdfError) -> Self {
        match e {
            KdfError::EmptySecret => VaultError::Configuration(e.to_string()),
        }
    }
}

impl From<CipherError> for VaultError {
    fn from(e: CipherError) -> Self {
        match e {
            CipherError::AeadFailure => VaultError::Authentication(e.to_string()),
            CipherError::InvalidFormat => VaultError::FormatMismatch(e.to_string()),
            CipherError::InvalidUtf8 => VaultError::Internal(e.to_string()),
        }
    }
}

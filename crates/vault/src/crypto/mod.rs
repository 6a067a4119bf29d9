//! AES-256-GCM-SIV field encryption primitives.
//!
//! This module is intentionally free of configuration and persistence
//! dependencies. It provides the encrypt/decrypt operations used by the
//! compatibility read path and by write-path collaborators.
//!
//! # Packed ciphertext format
//!
//! ```text
//! v1.<base64url-no-pad(nonce)>.<base64url-no-pad(ciphertext+tag)>
//! ```
//!
//! The `.` separator is outside the base64url alphabet, so the split between
//! nonce and ciphertext is always unambiguous. The `v1` prefix enables future
//! algorithm or key-version migration without breaking existing ciphertext.

pub mod cipher;

pub use cipher::{CipherError, EncryptedField, NONCE_LEN};

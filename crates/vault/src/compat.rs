//! Compatibility read path for fields that predate encryption.
//!
//! Three generations of stored data coexist in the portal database:
//!
//! 1. real packed ciphertext (`v1.<nonce>.<ciphertext>`),
//! 2. seed/demo placeholders tagged with the `enc_` sentinel prefix,
//! 3. pre-encryption plaintext (emails, free-text notes, the odd JSON blob).
//!
//! Reads must tolerate all three without crashing the caller. Classification
//! happens once, in [`classify`]; call sites never sniff strings themselves.

use tracing::debug;

use crate::crypto::cipher::{decrypt_field, CipherError, EncryptedField};
use crate::kdf::KeyHandle;

/// Sentinel prefix on placeholder values written by seed scripts. Never
/// produced by the cipher.
pub const PLACEHOLDER_PREFIX: &str = "enc_";

/// The classified shape of one stored field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredField {
    /// Real packed ciphertext, parsed and ready to decrypt.
    Encrypted(EncryptedField),
    /// Seed-data placeholder; payload is the text after the sentinel prefix.
    Placeholder(String),
    /// Pre-encryption plaintext, passed through unchanged.
    Legacy(String),
}

/// Classify a stored value into one of the three coexisting formats.
///
/// The sentinel prefix wins over everything else; a value that parses as
/// packed ciphertext is [`StoredField::Encrypted`]; anything else is
/// [`StoredField::Legacy`].
pub fn classify(stored: &str) -> StoredField {
    if let Some(rest) = stored.strip_prefix(PLACEHOLDER_PREFIX) {
        return StoredField::Placeholder(rest.to_owned());
    }
    match EncryptedField::from_packed(stored) {
        Ok(field) => StoredField::Encrypted(field),
        Err(_) => StoredField::Legacy(stored.to_owned()),
    }
}

/// Decrypt a stored value of any generation, degrading gracefully for the
/// shapes that are not ciphertext.
///
/// - `None` or empty ⇒ `Ok(None)`. Callers treat this as "no value"; a
///   missing value and a never-set optional field are indistinguishable by
///   design, which is acceptable because this path serves only optional,
///   nullable fields.
/// - Placeholder ⇒ sentinel stripped, underscores mapped to spaces (the
///   documented cosmetic behaviour of seed data); no cipher call is made.
/// - Packed ciphertext ⇒ real decryption. A value that *is* packed-shaped
///   but fails tag verification propagates [`CipherError::AeadFailure`]:
///   tampering with genuine ciphertext is never downgraded to "must be
///   legacy plaintext".
/// - Anything else ⇒ returned unchanged.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] or [`CipherError::InvalidUtf8`] only
/// for values classified as real ciphertext; no other shape can error.
pub fn safe_decrypt(
    stored: Option<&str>,
    key: &KeyHandle,
) -> Result<Option<String>, CipherError> {
    let stored = match stored {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(None),
    };

    match classify(stored) {
        StoredField::Encrypted(field) => decrypt_field(&field, key).map(Some),
        StoredField::Placeholder(payload) => {
            debug!("placeholder value on read path, skipping decryption");
            Ok(Some(payload.replace('_', " ")))
        }
        StoredField::Legacy(value) => {
            debug!("unencrypted legacy value on read path");
            Ok(Some(value))
        }
    }
}

//! AES-256-GCM-SIV encryption and decryption of individual string fields.
//!
//! Every encrypt call mints a fresh random 96-bit nonce from the OS CSPRNG;
//! callers can never supply or reuse one. AES-256-GCM-SIV (RFC 8452) is
//! additionally nonce-misuse-resistant, so even an improbable nonce collision
//! does not break authentication.
//!
//! Two storage encodings share this one cipher:
//! - *split*: ciphertext and nonce as two base64url strings for two columns;
//! - *packed*: one string, `v1.<base64url(nonce)>.<base64url(ciphertext+tag)>`.

use aes_gcm_siv::{
    aead::{Aead, KeyInit, OsRng},
    Aes256GcmSiv, Key, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use thiserror::Error;

use common::record::EncryptedColumns;

use crate::kdf::KeyHandle;

/// Byte length of an AES-GCM-SIV nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Prefix that appears at the start of every packed ciphertext string.
pub const VERSION_PREFIX: &str = "v1";

/// Errors produced by the cipher layer.
#[derive(Debug, Error)]
pub enum CipherError {
    /// AEAD tag verification failed: wrong key or tampered/corrupted data.
    #[error("aead authentication failed")]
    AeadFailure,

    /// The stored string does not match the expected packed or split format.
    #[error("invalid encrypted field format")]
    InvalidFormat,

    /// Decryption succeeded but the plaintext is not valid UTF-8.
    #[error("decrypted plaintext is not valid UTF-8")]
    InvalidUtf8,
}

/// A parsed, encrypted field value: the (ciphertext, nonce) pair for one
/// logical plaintext.
///
/// Immutable once written — an update discards the pair and encrypts afresh
/// under a new nonce; ciphertext is never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedField {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw ciphertext + authentication tag bytes.
    pub ciphertext: Vec<u8>,
}

impl EncryptedField {
    /// Encode to the packed string representation,
    /// `v1.<base64url(nonce)>.<base64url(ciphertext+tag)>`.
    pub fn to_packed(&self) -> String {
        format!(
            "{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }

    /// Parse a packed ciphertext string back into an [`EncryptedField`].
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidFormat`] if the string does not match
    /// the expected `v1.<nonce>.<ciphertext>` structure — including a missing
    /// separator, a bad prefix, invalid base64url, or a nonce segment that
    /// does not decode to exactly [`NONCE_LEN`] bytes.
    pub fn from_packed(s: &str) -> Result<Self, CipherError> {
        let parts: Vec<&str> = s.splitn(3, '.').collect();
        if parts.len() != 3 || parts[0] != VERSION_PREFIX {
            return Err(CipherError::InvalidFormat);
        }
        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| CipherError::InvalidFormat)?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(CipherError::InvalidFormat);
        }
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&nonce_bytes);

        let ciphertext = URL_SAFE_NO_PAD
            .decode(parts[2])
            .map_err(|_| CipherError::InvalidFormat)?;

        Ok(Self { nonce, ciphertext })
    }

    /// Encode to the split representation: two base64url strings destined for
    /// two database columns.
    pub fn to_columns(&self) -> EncryptedColumns {
        EncryptedColumns {
            ciphertext: URL_SAFE_NO_PAD.encode(&self.ciphertext),
            nonce: URL_SAFE_NO_PAD.encode(self.nonce),
        }
    }

    /// Parse the split representation back into an [`EncryptedField`].
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::InvalidFormat`] on invalid base64url or a nonce
    /// of the wrong length.
    pub fn from_columns(ciphertext: &str, nonce: &str) -> Result<Self, CipherError> {
        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(nonce)
            .map_err(|_| CipherError::InvalidFormat)?;
        if nonce_bytes.len() != NONCE_LEN {
            return Err(CipherError::InvalidFormat);
        }
        let mut nonce_buf = [0u8; NONCE_LEN];
        nonce_buf.copy_from_slice(&nonce_bytes);

        let ciphertext = URL_SAFE_NO_PAD
            .decode(ciphertext)
            .map_err(|_| CipherError::InvalidFormat)?;

        Ok(Self {
            nonce: nonce_buf,
            ciphertext,
        })
    }
}

/// Encrypt a plaintext field under the derived key.
///
/// A random 96-bit nonce is generated per call via the OS CSPRNG, so
/// encrypting the same plaintext twice yields different ciphertext.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] on an internal AEAD error (should be
/// unreachable with a valid key and nonce).
pub fn encrypt_field(plaintext: &str, key: &KeyHandle) -> Result<EncryptedField, CipherError> {
    let cipher = build_cipher(key);

    // Use OsRng for a cryptographically secure random nonce.
    use aes_gcm_siv::aead::rand_core::RngCore;
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|_| CipherError::AeadFailure)?;

    Ok(EncryptedField {
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Decrypt an [`EncryptedField`] back to its plaintext string.
///
/// # Errors
///
/// Returns [`CipherError::AeadFailure`] if tag verification fails (wrong key
/// or tampered data) and [`CipherError::InvalidUtf8`] if the decrypted bytes
/// are not a UTF-8 string.
pub fn decrypt_field(field: &EncryptedField, key: &KeyHandle) -> Result<String, CipherError> {
    let cipher = build_cipher(key);
    let nonce = Nonce::from_slice(&field.nonce);
    let plaintext = cipher
        .decrypt(nonce, field.ciphertext.as_ref())
        .map_err(|_| CipherError::AeadFailure)?;
    String::from_utf8(plaintext).map_err(|_| CipherError::InvalidUtf8)
}

/// Encrypt a plaintext straight to the packed string representation.
///
/// # Errors
///
/// Propagates errors from [`encrypt_field`].
pub fn pack(plaintext: &str, key: &KeyHandle) -> Result<String, CipherError> {
    Ok(encrypt_field(plaintext, key)?.to_packed())
}

/// Decrypt a packed ciphertext string back to plaintext.
///
/// # Errors
///
/// Returns [`CipherError::InvalidFormat`] when `packed` does not have the
/// packed structure (the compatibility read path treats this as "not
/// ciphertext", see [`crate::compat`]), [`CipherError::AeadFailure`] when the
/// shape is right but tag verification fails.
pub fn unpack(packed: &str, key: &KeyHandle) -> Result<String, CipherError> {
    let field = EncryptedField::from_packed(packed)?;
    decrypt_field(&field, key)
}

/// Encrypt a plaintext straight to the split-column representation.
///
/// # Errors
///
/// Propagates errors from [`encrypt_field`].
pub fn encrypt_split(plaintext: &str, key: &KeyHandle) -> Result<EncryptedColumns, CipherError> {
    Ok(encrypt_field(plaintext, key)?.to_columns())
}

/// Decrypt the split-column representation back to plaintext.
///
/// # Errors
///
/// Returns [`CipherError::InvalidFormat`] when either column is not valid
/// base64url or the nonce has the wrong length, [`CipherError::AeadFailure`]
/// when tag verification fails.
pub fn decrypt_split(
    ciphertext: &str,
    nonce: &str,
    key: &KeyHandle,
) -> Result<String, CipherError> {
    let field = EncryptedField::from_columns(ciphertext, nonce)?;
    decrypt_field(&field, key)
}

fn build_cipher(key: &KeyHandle) -> Aes256GcmSiv {
    // KeyHandle guarantees exactly 32 bytes, so construction cannot fail.
    Aes256GcmSiv::new(Key::<Aes256GcmSiv>::from_slice(key.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::derive_key;

    fn test_key() -> KeyHandle {
        derive_key("unit-test-secret").unwrap()
    }

    #[test]
    fn encrypt_decrypt_round_trip() {
        let key = test_key();
        let encrypted = encrypt_field("8-123-456", &key).unwrap();
        let decrypted = decrypt_field(&encrypted, &key).unwrap();
        assert_eq!(decrypted, "8-123-456");
    }

    #[test]
    fn pack_unpack_round_trip() {
        let key = test_key();
        let packed = pack("O+ allergic to penicillin", &key).unwrap();
        assert!(packed.starts_with("v1."));
        assert_eq!(unpack(&packed, &key).unwrap(), "O+ allergic to penicillin");
    }

    #[test]
    fn split_columns_round_trip() {
        let key = test_key();
        let cols = encrypt_split("Juan Pérez", &key).unwrap();
        assert_eq!(
            decrypt_split(&cols.ciphertext, &cols.nonce, &key).unwrap(),
            "Juan Pérez"
        );
    }

    #[test]
    fn fresh_nonce_per_call() {
        let key = test_key();
        let a = encrypt_field("same plaintext", &key).unwrap();
        let b = encrypt_field("same plaintext", &key).unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let k1 = derive_key("secret-one").unwrap();
        let k2 = derive_key("secret-two").unwrap();
        let encrypted = encrypt_field("secret", &k1).unwrap();
        assert!(matches!(
            decrypt_field(&encrypted, &k2),
            Err(CipherError::AeadFailure)
        ));
    }

    #[test]
    fn tampered_ciphertext_fails_auth() {
        let key = test_key();
        let mut field = encrypt_field("tamper me", &key).unwrap();
        field.ciphertext[0] ^= 0xFF;
        assert!(matches!(
            decrypt_field(&field, &key),
            Err(CipherError::AeadFailure)
        ));
    }

    #[test]
    fn tampered_nonce_fails_auth() {
        let key = test_key();
        let mut field = encrypt_field("tamper me", &key).unwrap();
        field.nonce[0] ^= 0x01;
        assert!(matches!(
            decrypt_field(&field, &key),
            Err(CipherError::AeadFailure)
        ));
    }

    #[test]
    fn from_packed_rejects_bad_prefix() {
        assert!(matches!(
            EncryptedField::from_packed("v2.abc.def"),
            Err(CipherError::InvalidFormat)
        ));
    }

    #[test]
    fn from_packed_rejects_missing_separator() {
        assert!(matches!(
            EncryptedField::from_packed("juan.perez@example.test"),
            Err(CipherError::InvalidFormat)
        ));
        assert!(matches!(
            EncryptedField::from_packed("v1.abc"),
            Err(CipherError::InvalidFormat)
        ));
    }

    #[test]
    fn from_packed_rejects_bad_base64() {
        assert!(matches!(
            EncryptedField::from_packed("v1.!!!.abc"),
            Err(CipherError::InvalidFormat)
        ));
    }

    #[test]
    fn from_packed_rejects_wrong_nonce_length() {
        // "AAAA" decodes to 3 bytes, not NONCE_LEN.
        assert!(matches!(
            EncryptedField::from_packed("v1.AAAA.q1o8"),
            Err(CipherError::InvalidFormat)
        ));
    }

    #[test]
    fn from_columns_rejects_wrong_nonce_length() {
        assert!(matches!(
            EncryptedField::from_columns("q1o8", "AAAA"),
            Err(CipherError::InvalidFormat)
        ));
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let key = test_key();
        let packed = pack("", &key).unwrap();
        assert_eq!(unpack(&packed, &key).unwrap(), "");
    }
}

//! Persisted shapes for protected entity fields.
//!
//! The database collaborator owns the schema; these types describe the two
//! physical encodings it stores for every protected value, serialised as JSON
//! when they cross an API boundary.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Split encoding
// ---------------------------------------------------------------------------

/// Split encoding: ciphertext and nonce persisted as two separate columns
/// (`<field>_ciphertext`, `<field>_nonce`), both base64url-no-pad strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedColumns {
    /// Base64url-encoded ciphertext + authentication tag.
    pub ciphertext: String,
    /// Base64url-encoded 96-bit nonce.
    pub nonce: String,
}

// ---------------------------------------------------------------------------
// Packed encoding
// ---------------------------------------------------------------------------

/// Packed encoding: a single stored string holding
/// `v1.<base64url(nonce)>.<base64url(ciphertext+tag)>`, plus the optional
/// searchable digest persisted next to it (`<field>_hash`) for equality
/// lookups that never decrypt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedField {
    /// The packed ciphertext string.
    pub stored: String,
    /// SHA-256 hex digest of the normalised plaintext, when the field is
    /// used in equality lookups.
    pub lookup_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypted_columns_round_trip() {
        let cols = EncryptedColumns {
            ciphertext: "q1o8xQ".into(),
            nonce: "AAAAAAAAAAAAAAAA".into(),
        };
        let json = serde_json::to_string(&cols).unwrap();
        let decoded: EncryptedColumns = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, cols);
    }

    #[test]
    fn protected_field_round_trip() {
        let field = ProtectedField {
            stored: "v1.AAAAAAAAAAAAAAAA.q1o8xQ".into(),
            lookup_hash: Some("ab".repeat(32)),
        };
        let json = serde_json::to_string(&field).unwrap();
        let decoded: ProtectedField = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, field);
    }

    #[test]
    fn lookup_hash_is_optional_in_json() {
        let decoded: ProtectedField =
            serde_json::from_str(r#"{"stored":"v1.a.b","lookup_hash":null}"#).unwrap();
        assert!(decoded.lookup_hash.is_none());
    }
}

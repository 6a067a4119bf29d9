//! Searchable hash index for equality lookups over encrypted columns.
//!
//! Random nonces make ciphertext for the same plaintext differ on every
//! write, so `WHERE ciphertext = ?` can never work. The persistence layer
//! instead stores this deterministic digest next to the ciphertext and
//! queries `WHERE <field>_hash = lookup_hash(candidate)`. Anyone with
//! database access learns which rows share a value, but not the value — a
//! documented trade-off, not an authentication mechanism.

use sha2::{Digest, Sha256};

/// Compute the lookup digest of a plaintext value: trim, Unicode-lowercase,
/// SHA-256, lowercase hex (64 characters).
///
/// The same normalisation runs at write time and at query time; any drift
/// between the two makes lookups silently miss, so both paths must call this
/// one function.
pub fn lookup_hash(value: &str) -> String {
    let normalised = value.trim().to_lowercase();
    hex::encode(Sha256::digest(normalised.as_bytes()))
}

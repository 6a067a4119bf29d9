//! Display-only redaction of sensitive values.
//!
//! Used by presentation collaborators that show partial identifiers (e.g.
//! `****4321` on an audit dashboard). Never used for a security decision —
//! the stored value stays encrypted regardless.

/// Number of trailing characters [`mask_default`] leaves visible.
pub const DEFAULT_VISIBLE_SUFFIX: usize = 4;

const MASK_CHAR: char = '*';

/// Replace all but the last `visible_suffix` characters of `value` with `*`.
///
/// Counts are in characters, not bytes, so multi-byte text masks cleanly.
/// When the value has `visible_suffix` characters or fewer, every character
/// is masked — a short value never leaks in full.
pub fn mask(value: &str, visible_suffix: usize) -> String {
    let total = value.chars().count();
    if total <= visible_suffix {
        return MASK_CHAR.to_string().repeat(total);
    }
    let hidden = total - visible_suffix;
    let mut out = MASK_CHAR.to_string().repeat(hidden);
    out.extend(value.chars().skip(hidden));
    out
}

/// [`mask`] with the default suffix of [`DEFAULT_VISIBLE_SUFFIX`] characters.
pub fn mask_default(value: &str) -> String {
    mask(value, DEFAULT_VISIBLE_SUFFIX)
}

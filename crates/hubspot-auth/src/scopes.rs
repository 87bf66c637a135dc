//! Scope list normalization
//!
//! The SCOPE environment variable shows up in three shapes in practice:
//! space-delimited (`a b`), comma-delimited (`a,b` / `a, b`), and
//! URL-encoded space (`a%20b`, pasted straight from an install URL). All
//! three normalize to the single space-delimited form the authorization
//! endpoint expects.

/// Normalize a raw scope list to space-delimited form.
pub fn normalize_scopes(raw: &str) -> String {
    raw.replace("%20", " ")
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

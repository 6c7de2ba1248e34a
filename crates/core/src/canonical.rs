//! Label canonicalisation.
//!
//! Recognition output labels the same measurement in many ways (`"Blood Pressure"`,
//! `"blood_pressure"`, `"BLOODPRESSURE:"`). Canonicalisation collapses these into one comparable
//! key: lowercase, with everything outside `[a-z0-9]` removed.

use std::fmt;

/// A label reduced to lowercase ASCII alphanumerics.
///
/// Only [`canonicalize`] constructs this type, so every value upholds the invariant. The key may
/// be empty when the label had no alphanumeric content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Returns the inner key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalise an arbitrary label into its [`CanonicalKey`].
///
/// Total and deterministic: lowercases the input (full Unicode lowercasing, so characters such
/// as the Kelvin sign fold to `k`) and keeps only ASCII letters and digits.
pub fn canonicalize(label: &str) -> CanonicalKey {
    CanonicalKey(
        label
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            .collect(),
    )
}

//! Alias table mapping canonical labels to target fields.
//!
//! This is the single owner of the label vocabulary. Each entry maps one canonical key to exactly
//! one [`TargetField`]; a field may be reachable through several keys. Lookup is exact-match on
//! the canonical key only.

use crate::canonical::{canonicalize, CanonicalKey};
use crate::constants::ALIAS_TABLE_VERSION;
use intake_types::TargetField;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Built-in aliases, already in canonical form.
const BUILTIN_ALIASES: &[(&str, TargetField)] = &[
    ("pregnancies", TargetField::Pregnancies),
    ("glucose", TargetField::Glucose),
    ("bloodpressure", TargetField::BloodPressure),
    ("systolic", TargetField::BloodPressure),
    ("skinthickness", TargetField::SkinThickness),
    ("tricepsskin", TargetField::SkinThickness),
    ("insulin", TargetField::Insulin),
    ("bmi", TargetField::Bmi),
    ("diabetespedigreefunction", TargetField::DiabetesPedigreeFunction),
    ("dpf", TargetField::DiabetesPedigreeFunction),
    ("age", TargetField::Age),
];

/// Read-only mapping from [`CanonicalKey`] to [`TargetField`].
#[derive(Debug)]
pub struct AliasTable {
    version: u32,
    entries: HashMap<&'static str, TargetField>,
}

impl AliasTable {
    /// The shared built-in table. Initialised on first use and never mutated afterwards.
    pub fn builtin() -> &'static AliasTable {
        static TABLE: OnceLock<AliasTable> = OnceLock::new();
        TABLE.get_or_init(|| AliasTable {
            version: ALIAS_TABLE_VERSION,
            entries: BUILTIN_ALIASES.iter().copied().collect(),
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Resolve a canonical key. `None` means the label is not part of the vocabulary.
    pub fn resolve(&self, key: &CanonicalKey) -> Option<TargetField> {
        self.entries.get(key.as_str()).copied()
    }

    /// Canonicalise then resolve an arbitrary label.
    pub fn resolve_label(&self, label: &str) -> Option<TargetField> {
        self.resolve(&canonicalize(label))
    }

    /// All canonical keys that resolve to `field`, sorted.
    pub fn aliases_for(&self, field: TargetField) -> Vec<&'static str> {
        let mut aliases: Vec<&'static str> = self
            .entries
            .iter()
            .filter(|(_, target)| **target == field)
            .map(|(key, _)| *key)
            .collect();
        aliases.sort_unstable();
        aliases
    }

    /// Number of canonical keys in the table.
    pub fn alias_count(&self) -> usize {
        self.entries.len()
    }
}

/// Resolve a canonical key against the built-in table.
pub fn resolve(key: &CanonicalKey) -> Option<TargetField> {
    AliasTable::builtin().resolve(key)
}

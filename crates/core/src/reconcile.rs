//! Reconciliation of raw extraction output into a [`ReconciledRecord`].
//!
//! Each raw `(label, value)` entry is canonicalised, resolved through the alias table and coerced
//! to a number. Resolved values overwrite the corresponding field of a zeroed record; when two
//! labels resolve to the same field the later entry wins. Unknown labels are skipped.
//!
//! The transform is pure: no I/O, no shared mutable state, and it cannot fail.

use crate::alias::AliasTable;
use crate::canonical::canonicalize;
use crate::coerce::coerce_checked;
use intake_types::{FieldSet, ReconciledRecord, TargetField};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Insertion-ordered mapping of raw labels to raw values, as produced by the recognition service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawExtractionRecord(Map<String, Value>);

impl RawExtractionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Re-inserting an existing label replaces its value in place.
    pub fn insert(&mut self, label: impl Into<String>, value: Value) {
        self.0.insert(label.into(), value);
    }

    /// Entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(label, value)| (label.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RawExtractionRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for RawExtractionRecord {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Outcome of a reconciliation together with coverage information.
///
/// `record` is always identical to what [`reconcile`] returns for the same input.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReconcileReport {
    pub record: ReconciledRecord,
    /// Fields that received at least one raw entry, in display order.
    pub resolved: Vec<TargetField>,
    /// Labels with no alias, in input order.
    pub ignored_labels: Vec<String>,
    /// Fields whose winning raw value was not numeric and fell back to zero.
    pub invalid_values: Vec<TargetField>,
    /// Fields written by more than one raw entry.
    pub overridden: Vec<TargetField>,
}

impl ReconcileReport {
    /// Fraction of the eight fields that were resolved from the raw record.
    pub fn coverage(&self) -> f64 {
        self.resolved.len() as f64 / TargetField::ALL.len() as f64
    }
}

/// The zeroed baseline record; also what the form's reset action restores.
pub fn default_record() -> ReconciledRecord {
    ReconciledRecord::zeroed()
}

/// Reconcile a raw extraction record into a complete record.
pub fn reconcile(raw: &RawExtractionRecord) -> ReconciledRecord {
    reconcile_entries(raw.iter())
}

/// Reconcile an optional raw record; an absent record yields [`default_record`].
pub fn reconcile_optional(raw: Option<&RawExtractionRecord>) -> ReconciledRecord {
    raw.map(reconcile).unwrap_or_else(default_record)
}

/// Reconcile any ordered sequence of `(label, value)` entries.
pub fn reconcile_entries<'a, I>(entries: I) -> ReconciledRecord
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    reconcile_entries_with_report(entries).record
}

/// Reconcile and report which fields were resolved, ignored or defaulted.
pub fn reconcile_with_report(raw: &RawExtractionRecord) -> ReconcileReport {
    reconcile_entries_with_report(raw.iter())
}

fn reconcile_entries_with_report<'a, I>(entries: I) -> ReconcileReport
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let table = AliasTable::builtin();
    let mut record = default_record();
    let mut resolved = FieldSet::new();
    let mut invalid = FieldSet::new();
    let mut overridden = FieldSet::new();
    let mut ignored_labels = Vec::new();

    for (label, value) in entries {
        let key = canonicalize(label);
        let Some(field) = table.resolve(&key) else {
            tracing::debug!(label, key = %key, "ignoring unrecognised label");
            ignored_labels.push(label.to_owned());
            continue;
        };

        if !resolved.insert(field) {
            tracing::debug!(label, %field, "overriding earlier value for field");
            overridden.insert(field);
        }

        match coerce_checked(value) {
            Some(n) => {
                invalid.remove(field);
                record.set(field, n);
            }
            None => {
                tracing::debug!(label, %field, raw = %value, "value is not numeric, using default");
                invalid.insert(field);
                record.set(field, crate::coerce::DEFAULT_VALUE);
            }
        }
    }

    if resolved.is_empty() && !ignored_labels.is_empty() {
        tracing::debug!(
            ignored = ignored_labels.len(),
            "no label matched a target field"
        );
    }

    ReconcileReport {
        record,
        resolved: resolved.fields(),
        ignored_labels,
        invalid_values: invalid.fields(),
        overridden: overridden.fields(),
    }
}

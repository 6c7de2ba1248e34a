//! Request and response bodies for the intake HTTP API.
//!
//! Target fields appear on the wire by their payload key (`bloodPressure`, ...). Records are the
//! flat eight-key prediction payload.

use intake_core::{AliasTable, RawExtractionRecord, ReconcileReport, ReconciledRecord, TargetField};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Display and lookup metadata for one target field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldDescriptor {
    /// Payload key, e.g. `bloodPressure`.
    pub key: String,
    pub label: String,
    pub placeholder: String,
    pub step: f64,
    /// Canonical labels that resolve to this field.
    pub aliases: Vec<String>,
}

impl FieldDescriptor {
    pub fn from_field(field: TargetField, table: &AliasTable) -> Self {
        Self {
            key: field.key().to_string(),
            label: field.label().to_string(),
            placeholder: field.placeholder().to_string(),
            step: field.step(),
            aliases: table
                .aliases_for(field)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListFieldsRes {
    pub alias_table_version: u32,
    pub fields: Vec<FieldDescriptor>,
}

impl ListFieldsRes {
    /// Describe every field of `table` in display order.
    pub fn from_table(table: &AliasTable) -> Self {
        Self {
            alias_table_version: table.version(),
            fields: TargetField::ALL
                .into_iter()
                .map(|field| FieldDescriptor::from_field(field, table))
                .collect(),
        }
    }
}

/// Recognition service output to reconcile. `extracted` may be missing or `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReconcileReq {
    #[serde(default)]
    #[schema(value_type = Object, nullable)]
    pub extracted: Option<RawExtractionRecord>,
}

impl ReconcileReq {
    pub fn entry_count(&self) -> usize {
        self.extracted.as_ref().map_or(0, RawExtractionRecord::len)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReconcileRes {
    /// Flat eight-key record.
    pub record: ReconciledRecord,
    pub resolved: Vec<String>,
    pub ignored_labels: Vec<String>,
    pub invalid_values: Vec<String>,
    pub overridden: Vec<String>,
    /// Share of fields resolved from the document, between 0 and 1.
    pub coverage: f64,
    pub alias_table_version: u32,
}

impl ReconcileRes {
    pub fn from_report(report: ReconcileReport, alias_table_version: u32) -> Self {
        fn keys(fields: &[TargetField]) -> Vec<String> {
            fields.iter().map(|field| field.key().to_string()).collect()
        }

        Self {
            coverage: report.coverage(),
            resolved: keys(&report.resolved),
            invalid_values: keys(&report.invalid_values),
            overridden: keys(&report.overridden),
            ignored_labels: report.ignored_labels,
            record: report.record,
            alias_table_version,
        }
    }
}

/// Form values to normalise into a prediction payload. Keys are matched like extracted labels.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PayloadReq {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub values: RawExtractionRecord,
}

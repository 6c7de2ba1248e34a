//! # Intake Core
//!
//! Reconciles loosely labelled key/value pairs from a scanned report into the fixed eight-field
//! measurement record used by the prediction form.
//!
//! Pipeline per raw entry:
//! - [`canonicalize`] the label to lowercase ASCII alphanumerics
//! - [`resolve`] the canonical key through the [`AliasTable`], skipping unknown labels
//! - [`coerce`] the raw value to a finite number, defaulting to `0`
//! - write it into a copy of the [`default_record`], later entries overwriting earlier ones
//!
//! Everything here is pure and synchronous. Fallible edges (parsing documents, configuration)
//! return [`IntakeError`]; reconciliation itself cannot fail.
//!
//! **No API concerns**: HTTP servers and CLIs belong in `api-rest` and `intake-cli`.

pub mod alias;
pub mod canonical;
pub mod coerce;
pub mod config;
pub mod constants;
pub mod error;
pub mod extraction;
pub mod reconcile;

pub use alias::{resolve, AliasTable};
pub use canonical::{canonicalize, CanonicalKey};
pub use coerce::{coerce, coerce_checked, DEFAULT_VALUE};
pub use config::CoreConfig;
pub use constants::ALIAS_TABLE_VERSION;
pub use error::{IntakeError, IntakeResult};
pub use extraction::{
    parse_extraction_document, raw_record_from_value, read_extraction_file, ExtractionResponse,
};
pub use reconcile::{
    default_record, reconcile, reconcile_entries, reconcile_optional, reconcile_with_report,
    RawExtractionRecord, ReconcileReport,
};

pub use intake_types::{FieldError, ReconciledRecord, TargetField};

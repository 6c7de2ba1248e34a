//! Boundary parsing for recognition service output.
//!
//! The recognition service replies with `{"extracted": {...}}`. Files saved by hand are often just
//! the inner object, so both shapes are accepted. A missing or `null` `extracted` member is an
//! empty record rather than an error.

use crate::constants::EXTRACTED_MEMBER;
use crate::reconcile::RawExtractionRecord;
use crate::{IntakeError, IntakeResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Response envelope of the recognition service.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    #[serde(default)]
    pub extracted: Option<RawExtractionRecord>,
}

impl ExtractionResponse {
    /// The carried record, or an empty one when absent.
    pub fn into_raw(self) -> RawExtractionRecord {
        self.extracted.unwrap_or_default()
    }
}

/// Interpret a parsed JSON document as a raw extraction record.
///
/// # Errors
///
/// Returns `IntakeError::InvalidInput` if the document is not an object, or if its `extracted`
/// member is neither an object nor `null`.
pub fn raw_record_from_value(value: Value) -> IntakeResult<RawExtractionRecord> {
    let Value::Object(mut map) = value else {
        return Err(IntakeError::InvalidInput(
            "extraction document must be a JSON object".into(),
        ));
    };

    let is_envelope = match map.get(EXTRACTED_MEMBER) {
        Some(Value::Object(_) | Value::Null) => true,
        Some(other) if map.len() == 1 => {
            return Err(IntakeError::InvalidInput(format!(
                "'{EXTRACTED_MEMBER}' must be an object or null, found {}",
                json_kind(other)
            )));
        }
        // Either a bare record, or one that happens to carry a label called "extracted".
        _ => false,
    };

    if !is_envelope {
        return Ok(map.into());
    }

    match map.remove(EXTRACTED_MEMBER) {
        Some(Value::Object(inner)) => Ok(inner.into()),
        _ => Ok(RawExtractionRecord::new()),
    }
}

/// Parse extraction JSON text in either accepted shape.
pub fn parse_extraction_document(text: &str) -> IntakeResult<RawExtractionRecord> {
    let value: Value = serde_json::from_str(text)?;
    raw_record_from_value(value)
}

/// Read and parse an extraction JSON file.
pub fn read_extraction_file(path: &Path) -> IntakeResult<RawExtractionRecord> {
    let text = std::fs::read_to_string(path).map_err(IntakeError::FileRead)?;
    tracing::debug!(path = %path.display(), "read extraction document");
    parse_extraction_document(&text)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

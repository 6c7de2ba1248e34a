//! # Intake Types
//!
//! Shared data model for the intake workspace:
//! - [`TargetField`]: the closed set of eight numeric measurements the prediction service needs
//! - [`ReconciledRecord`]: a complete record holding a finite value for every field
//!
//! Enable the `utoipa` feature to derive OpenAPI schemas for both types.
//!
//! The wire names of the fields (`bloodPressure`, `diabetesPedigreeFunction`, ...) are also the keys
//! of the flat prediction payload, so serialising a [`ReconciledRecord`] produces that payload
//! directly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors that can occur when working with field identifiers.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// The given name is not the wire name of any target field.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// One of the eight numeric measurement slots.
///
/// Ordering follows the form's display order and carries no other meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub enum TargetField {
    Pregnancies,
    Glucose,
    BloodPressure,
    SkinThickness,
    Insulin,
    Bmi,
    DiabetesPedigreeFunction,
    Age,
}

impl TargetField {
    /// Every field, in display order.
    pub const ALL: [TargetField; 8] = [
        TargetField::Pregnancies,
        TargetField::Glucose,
        TargetField::BloodPressure,
        TargetField::SkinThickness,
        TargetField::Insulin,
        TargetField::Bmi,
        TargetField::DiabetesPedigreeFunction,
        TargetField::Age,
    ];

    /// Key used in the flat prediction payload and by form bindings.
    pub fn key(self) -> &'static str {
        match self {
            TargetField::Pregnancies => "pregnancies",
            TargetField::Glucose => "glucose",
            TargetField::BloodPressure => "bloodPressure",
            TargetField::SkinThickness => "skinThickness",
            TargetField::Insulin => "insulin",
            TargetField::Bmi => "bmi",
            TargetField::DiabetesPedigreeFunction => "diabetesPedigreeFunction",
            TargetField::Age => "age",
        }
    }

    /// Human-readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            TargetField::Pregnancies => "Pregnancies",
            TargetField::Glucose => "Glucose",
            TargetField::BloodPressure => "Blood Pressure",
            TargetField::SkinThickness => "Skin Thickness",
            TargetField::Insulin => "Insulin",
            TargetField::Bmi => "BMI",
            TargetField::DiabetesPedigreeFunction => "Diabetes Pedigree Function",
            TargetField::Age => "Age",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            TargetField::Pregnancies => "Number of pregnancies",
            TargetField::Glucose => "Glucose level",
            TargetField::BloodPressure => "Blood pressure",
            TargetField::SkinThickness => "Skin thickness",
            TargetField::Insulin => "Insulin level",
            TargetField::Bmi => "BMI",
            TargetField::DiabetesPedigreeFunction => "DPF",
            TargetField::Age => "Age",
        }
    }

    /// Input granularity for the numeric control.
    pub fn step(self) -> f64 {
        match self {
            TargetField::Pregnancies | TargetField::Age => 1.0,
            TargetField::DiabetesPedigreeFunction => 0.01,
            _ => 0.1,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TargetField {
    type Err = FieldError;

    /// Parses the exact wire name. Label variations are handled by the alias table in
    /// `intake-core`, not here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| FieldError::UnknownField(s.to_owned()))
    }
}

/// A complete record over all eight target fields.
///
/// Every field always holds a finite number; [`ReconciledRecord::set`] stores `0` in place of
/// NaN or infinities. Missing keys default to `0` when deserialising.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct ReconciledRecord {
    pregnancies: f64,
    glucose: f64,
    blood_pressure: f64,
    skin_thickness: f64,
    insulin: f64,
    bmi: f64,
    diabetes_pedigree_function: f64,
    age: f64,
}

impl ReconciledRecord {
    /// The all-zero baseline record.
    pub fn zeroed() -> Self {
        Self::default()
    }

    pub fn get(&self, field: TargetField) -> f64 {
        *self.slot(field)
    }

    /// Set a field, replacing any non-finite value with `0`.
    pub fn set(&mut self, field: TargetField, value: f64) {
        *self.slot_mut(field) = if value.is_finite() { value } else { 0.0 };
    }

    /// Builder-style variant of [`ReconciledRecord::set`].
    pub fn with(mut self, field: TargetField, value: f64) -> Self {
        self.set(field, value);
        self
    }

    /// Iterate `(field, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (TargetField, f64)> + '_ {
        TargetField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    fn slot(&self, field: TargetField) -> &f64 {
        match field {
            TargetField::Pregnancies => &self.pregnancies,
            TargetField::Glucose => &self.glucose,
            TargetField::BloodPressure => &self.blood_pressure,
            TargetField::SkinThickness => &self.skin_thickness,
            TargetField::Insulin => &self.insulin,
            TargetField::Bmi => &self.bmi,
            TargetField::DiabetesPedigreeFunction => &self.diabetes_pedigree_function,
            TargetField::Age => &self.age,
        }
    }

    fn slot_mut(&mut self, field: TargetField) -> &mut f64 {
        match field {
            TargetField::Pregnancies => &mut self.pregnancies,
            TargetField::Glucose => &mut self.glucose,
            TargetField::BloodPressure => &mut self.blood_pressure,
            TargetField::SkinThickness => &mut self.skin_thickness,
            TargetField::Insulin => &mut self.insulin,
            TargetField::Bmi => &mut self.bmi,
            TargetField::DiabetesPedigreeFunction => &mut self.diabetes_pedigree_function,
            TargetField::Age => &mut self.age,
        }
    }
}

/// Tracks which fields have been touched, indexed by display order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldSet([bool; 8]);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the field was not already present.
    pub fn insert(&mut self, field: TargetField) -> bool {
        let was_present = self.0[field.index()];
        self.0[field.index()] = true;
        !was_present
    }

    pub fn remove(&mut self, field: TargetField) {
        self.0[field.index()] = false;
    }

    pub fn contains(&self, field: TargetField) -> bool {
        self.0[field.index()]
    }

    pub fn len(&self) -> usize {
        self.0.iter().filter(|present| **present).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Present fields in display order.
    pub fn fields(&self) -> Vec<TargetField> {
        TargetField::ALL
            .into_iter()
            .filter(|field| self.contains(*field))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_field_all_matches_declaration_order() {
        for (i, field) in TargetField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_target_field_from_str_round_trips_wire_names() {
        for field in TargetField::ALL {
            assert_eq!(field.key().parse::<TargetField>().unwrap(), field);
        }
    }

    #[test]
    fn test_target_field_from_str_rejects_label_variants() {
        let err = "Blood Pressure"
            .parse::<TargetField>()
            .expect_err("labels are not wire names");
        assert!(matches!(err, FieldError::UnknownField(name) if name == "Blood Pressure"));
    }

    #[test]
    fn test_target_field_serde_uses_wire_name() {
        let json = serde_json::to_string(&TargetField::DiabetesPedigreeFunction).unwrap();
        assert_eq!(json, "\"diabetesPedigreeFunction\"");
        assert_eq!(TargetField::SkinThickness.to_string(), "skinThickness");
    }

    #[test]
    fn test_step_matches_field_precision() {
        assert_eq!(TargetField::Age.step(), 1.0);
        assert_eq!(TargetField::Glucose.step(), 0.1);
        assert_eq!(TargetField::DiabetesPedigreeFunction.step(), 0.01);
    }

    #[test]
    fn test_reconciled_record_zeroed_is_all_zero() {
        let record = ReconciledRecord::zeroed();
        assert_eq!(record.iter().count(), 8);
        assert!(record.iter().all(|(_, v)| v == 0.0));
    }

    #[test]
    fn test_reconciled_record_set_replaces_non_finite_with_zero() {
        let mut record = ReconciledRecord::zeroed().with(TargetField::Glucose, 148.0);
        assert_eq!(record.get(TargetField::Glucose), 148.0);

        record.set(TargetField::Glucose, f64::NAN);
        assert_eq!(record.get(TargetField::Glucose), 0.0);

        record.set(TargetField::Age, f64::NEG_INFINITY);
        assert_eq!(record.get(TargetField::Age), 0.0);
    }

    #[test]
    fn test_reconciled_record_serialises_as_flat_payload() {
        let record = ReconciledRecord::zeroed()
            .with(TargetField::BloodPressure, 72.0)
            .with(TargetField::DiabetesPedigreeFunction, 0.627);
        let value = serde_json::to_value(record).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 8);
        assert_eq!(object["bloodPressure"], 72.0);
        assert_eq!(object["diabetesPedigreeFunction"], 0.627);
        assert_eq!(object["age"], 0.0);
    }

    #[test]
    fn test_reconciled_record_deserialise_defaults_missing_keys() {
        let record: ReconciledRecord = serde_json::from_str(r#"{"bmi": 33.6}"#).unwrap();
        assert_eq!(record.get(TargetField::Bmi), 33.6);
        assert_eq!(record.get(TargetField::Insulin), 0.0);
    }

    #[test]
    fn test_field_set_tracks_insertions_in_display_order() {
        let mut set = FieldSet::new();
        assert!(set.is_empty());
        assert!(set.insert(TargetField::Age));
        assert!(set.insert(TargetField::Glucose));
        assert!(!set.insert(TargetField::Age));

        assert_eq!(set.len(), 2);
        assert_eq!(set.fields(), vec![TargetField::Glucose, TargetField::Age]);

        set.remove(TargetField::Age);
        assert!(!set.contains(TargetField::Age));
    }
}

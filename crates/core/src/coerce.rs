//! Raw value coercion.
//!
//! Recognition output carries values of no fixed shape. These helpers reduce any JSON value to a
//! finite `f64`, using `0` whenever that is not possible.

use serde_json::Value;

/// Value used for fields that are missing or could not be coerced.
pub const DEFAULT_VALUE: f64 = 0.0;

/// Attempt to reduce a raw value to a finite number.
///
/// - numbers pass through
/// - strings are trimmed and parsed as a decimal number: an optional sign, an optional fraction
///   and, beyond plain sign-and-point decimals, an optional exponent (`"1e3"` is `1000`). Hex
///   literals and unit suffixes are not numeric.
/// - booleans map to `1` and `0`
/// - `null`, arrays and objects are not numeric
///
/// Returns `None` when the result would not be a finite number.
pub fn coerce_checked(raw: &Value) -> Option<f64> {
    let n = match raw {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_decimal(s)?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}

/// Total coercion: the finite value of `raw`, or [`DEFAULT_VALUE`].
pub fn coerce(raw: &Value) -> f64 {
    coerce_checked(raw).unwrap_or(DEFAULT_VALUE)
}

fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    // `f64::from_str` also accepts "inf"/"NaN" spellings; only digit-bearing input is numeric here.
    if !trimmed.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_numbers_pass_through() {
        assert_eq!(coerce(&json!(148)), 148.0);
        assert_eq!(coerce(&json!(-3)), -3.0);
        assert_eq!(coerce(&json!(0.627)), 0.627);
    }

    #[test]
    fn test_coerce_parses_numeric_strings() {
        assert_eq!(coerce(&json!("2")), 2.0);
        assert_eq!(coerce(&json!("0.627")), 0.627);
        assert_eq!(coerce(&json!("-1.5")), -1.5);
        assert_eq!(coerce(&json!("+72")), 72.0);
        assert_eq!(coerce(&json!(" 33.6 \n")), 33.6);
        assert_eq!(coerce(&json!(".5")), 0.5);
    }

    #[test]
    fn test_coerce_accepts_exponent_notation() {
        assert_eq!(coerce_checked(&json!("1e3")), Some(1000.0));
        assert_eq!(coerce_checked(&json!("2.5E-1")), Some(0.25));
        assert_eq!(coerce_checked(&json!("+.5")), Some(0.5));
        assert_eq!(coerce_checked(&json!("0x10")), None);
    }

    #[test]
    fn test_coerce_rejects_malformed_strings() {
        assert_eq!(coerce_checked(&json!("abc")), None);
        assert_eq!(coerce_checked(&json!("1.2.3")), None);
        assert_eq!(coerce_checked(&json!("--4")), None);
        assert_eq!(coerce_checked(&json!("148 mg/dL")), None);
        assert_eq!(coerce_checked(&json!("")), None);
        assert_eq!(coerce(&json!("abc")), DEFAULT_VALUE);
    }

    #[test]
    fn test_coerce_rejects_non_finite_spellings() {
        for raw in ["NaN", "inf", "-Infinity", "1e400"] {
            assert_eq!(coerce_checked(&json!(raw)), None, "{raw} should not coerce");
            assert_eq!(coerce(&json!(raw)), 0.0);
        }
    }

    #[test]
    fn test_coerce_booleans() {
        assert_eq!(coerce(&json!(true)), 1.0);
        assert_eq!(coerce(&json!(false)), 0.0);
    }

    #[test]
    fn test_coerce_non_scalars_fall_back_to_default() {
        assert_eq!(coerce_checked(&Value::Null), None);
        assert_eq!(coerce(&json!([5])), DEFAULT_VALUE);
        assert_eq!(coerce(&json!({"value": 5})), DEFAULT_VALUE);
    }
}

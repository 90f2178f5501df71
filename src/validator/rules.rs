//! Rule checkers: one pure function per constraint keyword.
//!
//! Every checker takes the descriptor's [`Constraints`] and the value under
//! test and returns `Ok(())` when the keyword is absent or satisfied.

use super::coerce::ParamValue;
use super::error::ValidationError;
use crate::spec::Constraints;

/// Full-string match against `pattern`.
pub fn validate_pattern(constraints: &Constraints, value: &str) -> Result<(), ValidationError> {
    match &constraints.pattern {
        Some(pattern) if !pattern.is_match(value) => Err(ValidationError::PatternMismatch {
            pattern: pattern.as_str().to_string(),
        }),
        _ => Ok(()),
    }
}

/// Inclusive lower bound.
pub fn validate_minimum(constraints: &Constraints, value: f64) -> Result<(), ValidationError> {
    match &constraints.minimum {
        Some(minimum) if minimum.as_f64().is_some_and(|min| value < min) => {
            Err(ValidationError::BelowMinimum {
                minimum: minimum.clone(),
            })
        }
        _ => Ok(()),
    }
}

/// Inclusive upper bound.
pub fn validate_maximum(constraints: &Constraints, value: f64) -> Result<(), ValidationError> {
    match &constraints.maximum {
        Some(maximum) if maximum.as_f64().is_some_and(|max| value > max) => {
            Err(ValidationError::AboveMaximum {
                maximum: maximum.clone(),
            })
        }
        _ => Ok(()),
    }
}

/// `len` is the element count of an array or the character count of a string.
pub fn validate_min_length(constraints: &Constraints, len: usize) -> Result<(), ValidationError> {
    match constraints.min_length {
        Some(min_length) if len < min_length => Err(ValidationError::TooShort { min_length }),
        _ => Ok(()),
    }
}

pub fn validate_max_length(constraints: &Constraints, len: usize) -> Result<(), ValidationError> {
    match constraints.max_length {
        Some(max_length) if len > max_length => Err(ValidationError::TooLong { max_length }),
        _ => Ok(()),
    }
}

pub fn validate_enum(constraints: &Constraints, value: &ParamValue) -> Result<(), ValidationError> {
    match &constraints.allowed {
        Some(allowed) if !allowed.iter().any(|v| value.matches_json(v)) => {
            Err(ValidationError::NotInEnum {
                allowed: allowed.clone(),
            })
        }
        _ => Ok(()),
    }
}

/// Run the applicable checkers in fixed order:
/// pattern, minimum, maximum, minLength, maxLength, enum.
///
/// `raw` is the text the value was coerced from; pattern and enum only apply
/// to scalars, range checks to numbers, length checks to strings and arrays.
pub fn check_constraints(
    constraints: &Constraints,
    raw: &str,
    value: &ParamValue,
) -> Result<(), ValidationError> {
    let scalar = !matches!(value, ParamValue::Array(_));
    if scalar {
        validate_pattern(constraints, raw)?;
    }
    if let Some(n) = value.as_f64() {
        validate_minimum(constraints, n)?;
        validate_maximum(constraints, n)?;
    }
    if let Some(len) = value.length() {
        validate_min_length(constraints, len)?;
        validate_max_length(constraints, len)?;
    }
    if scalar {
        validate_enum(constraints, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn constraints(v: serde_json::Value) -> Constraints {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_validate_pattern() {
        assert!(validate_pattern(&Constraints::default(), "").is_ok());
        assert!(validate_pattern(&constraints(json!({"pattern": "a"})), "a").is_ok());
        assert_eq!(
            validate_pattern(&constraints(json!({"pattern": "a"})), "b")
                .unwrap_err()
                .to_string(),
            "Invalid value, pattern \"a\" does not match"
        );
    }

    #[test]
    fn test_validate_pattern_is_not_substring_search() {
        let c = constraints(json!({"pattern": "[0-9]+"}));
        assert!(validate_pattern(&c, "123").is_ok());
        assert!(validate_pattern(&c, "x123").is_err());
    }

    #[test]
    fn test_validate_minimum() {
        assert!(validate_minimum(&Constraints::default(), 1.0).is_ok());
        assert!(validate_minimum(&constraints(json!({"minimum": 1})), 1.0).is_ok());
        assert_eq!(
            validate_minimum(&constraints(json!({"minimum": 1.1})), 1.0)
                .unwrap_err()
                .to_string(),
            "Invalid value, must be at least 1.1"
        );
    }

    #[test]
    fn test_validate_maximum() {
        assert!(validate_maximum(&Constraints::default(), 1.0).is_ok());
        assert!(validate_maximum(&constraints(json!({"maximum": 1})), 1.0).is_ok());
        assert_eq!(
            validate_maximum(&constraints(json!({"maximum": 0})), 1.0)
                .unwrap_err()
                .to_string(),
            "Invalid value, must be at most 0"
        );
    }

    #[test]
    fn test_validate_min_length() {
        assert!(validate_min_length(&Constraints::default(), 0).is_ok());
        assert!(validate_min_length(&Constraints::default(), 1).is_ok());
        assert!(validate_min_length(&constraints(json!({"minLength": 1})), [1].len()).is_ok());
        assert!(validate_min_length(&constraints(json!({"minLength": 2})), [1, 2].len()).is_ok());
        assert_eq!(
            validate_min_length(&constraints(json!({"minLength": 3})), [1, 2].len())
                .unwrap_err()
                .to_string(),
            "Length must be at least 3"
        );
    }

    #[test]
    fn test_validate_max_length() {
        assert!(validate_max_length(&Constraints::default(), 0).is_ok());
        assert!(validate_max_length(&Constraints::default(), 1).is_ok());
        assert!(validate_max_length(&constraints(json!({"maxLength": 2})), [1].len()).is_ok());
        assert!(validate_max_length(&constraints(json!({"maxLength": 2})), [1, 2].len()).is_ok());
        assert_eq!(
            validate_max_length(&constraints(json!({"maxLength": 3})), [1, 2, 3, 4].len())
                .unwrap_err()
                .to_string(),
            "Length must be at most 3"
        );
    }

    #[test]
    fn test_validate_enum() {
        let c = constraints(json!({"enum": ["a", "b"]}));
        assert!(validate_enum(&Constraints::default(), &ParamValue::String("z".into())).is_ok());
        assert!(validate_enum(&c, &ParamValue::String("a".into())).is_ok());
        assert_eq!(
            validate_enum(&c, &ParamValue::String("x".into()))
                .unwrap_err()
                .to_string(),
            "Enum value must be one of ['a', 'b']"
        );
        let numeric = constraints(json!({"enum": [1, 2]}));
        assert!(validate_enum(&numeric, &ParamValue::Integer(2)).is_ok());
        assert!(validate_enum(&numeric, &ParamValue::Integer(3)).is_err());
    }

    #[test]
    fn test_check_constraints_order() {
        // Both pattern and maximum fail; pattern is checked first.
        let c = constraints(json!({"pattern": "[0-9]", "maximum": 3}));
        let err = check_constraints(&c, "42", &ParamValue::Integer(42)).unwrap_err();
        assert_eq!(err.kind(), "pattern_mismatch");

        // minimum before enum
        let c = constraints(json!({"minimum": 5, "enum": [1]}));
        let err = check_constraints(&c, "2", &ParamValue::Integer(2)).unwrap_err();
        assert_eq!(err.kind(), "range_violation");
    }

    #[test]
    fn test_string_length_counts_characters() {
        let c = constraints(json!({"maxLength": 2}));
        assert!(check_constraints(&c, "éé", &ParamValue::String("éé".into())).is_ok());
        assert!(check_constraints(&c, "abc", &ParamValue::String("abc".into())).is_err());
    }

    #[test]
    fn test_array_skips_scalar_checks() {
        let c = constraints(json!({"pattern": "x", "minLength": 1}));
        let value = ParamValue::Array(vec![ParamValue::Integer(1)]);
        assert!(check_constraints(&c, "1", &value).is_ok());
    }
}

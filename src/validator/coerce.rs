//! Conversion of raw request strings into typed parameter values.

use crate::spec::{CollectionFormat, ParameterType};
use serde::Serialize;
use serde_json::Value;

/// A parameter value after coercion to its declared type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Number(f64),
    Boolean(bool),
    String(String),
    Array(Vec<ParamValue>),
    /// Declared `default` values, passed through as written
    Json(Value),
}

impl ParamValue {
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Integer(i) => Some(*i),
            ParamValue::Json(v) => v.as_i64(),
            _ => None,
        }
    }

    /// Numeric view used by range checks. Integers widen to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Integer(i) => Some(*i as f64),
            ParamValue::Number(n) => Some(*n),
            ParamValue::Json(v) => v.as_f64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(b) => Some(*b),
            ParamValue::Json(v) => v.as_bool(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            ParamValue::Json(v) => v.as_str(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Length seen by `minLength`/`maxLength`: characters for strings, elements for arrays.
    #[must_use]
    pub fn length(&self) -> Option<usize> {
        match self {
            ParamValue::String(s) => Some(s.chars().count()),
            ParamValue::Array(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Whether this value equals a JSON value from a descriptor (`enum` members).
    ///
    /// Numbers compare by value, so `Integer(1)` matches both `1` and `1.0`.
    #[must_use]
    pub fn matches_json(&self, other: &Value) -> bool {
        match (self, other) {
            (ParamValue::Integer(_) | ParamValue::Number(_), Value::Number(n)) => {
                self.as_f64() == n.as_f64()
            }
            (ParamValue::Boolean(b), Value::Bool(o)) => b == o,
            (ParamValue::String(s), Value::String(o)) => s == o,
            (ParamValue::Array(items), Value::Array(others)) => {
                items.len() == others.len()
                    && items.iter().zip(others).all(|(a, b)| a.matches_json(b))
            }
            (ParamValue::Json(v), o) => v == o,
            _ => false,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            ParamValue::Integer(i) => Value::from(*i),
            ParamValue::Number(n) => Value::from(*n),
            ParamValue::Boolean(b) => Value::Bool(*b),
            ParamValue::String(s) => Value::String(s.clone()),
            ParamValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            ParamValue::Json(v) => v.clone(),
        }
    }
}

/// Parse a base-10 integer. Surrounding whitespace and a leading sign are accepted;
/// fractions, exponents and empty strings are not.
#[must_use]
pub fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

/// Parse a finite float. `NaN` and infinities are rejected: they have no JSON form.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Case-insensitive `true`/`false`.
#[must_use]
pub fn parse_boolean(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Coerce a raw string to a scalar type.
///
/// Returns `None` when the text is not a valid literal of `param_type`, and
/// always for `Array`, which is handled element-wise by the validator.
#[must_use]
pub fn coerce_scalar(param_type: ParameterType, raw: &str) -> Option<ParamValue> {
    match param_type {
        ParameterType::Integer => parse_integer(raw).map(ParamValue::Integer),
        ParameterType::Number => parse_number(raw).map(ParamValue::Number),
        ParameterType::Boolean => parse_boolean(raw).map(ParamValue::Boolean),
        ParameterType::String => Some(ParamValue::String(raw.to_string())),
        ParameterType::Array => None,
    }
}

/// Split a joined array string into its raw elements.
///
/// An empty string yields a single empty element, which then fails coercion
/// for every non-string item type.
pub fn split_collection(raw: &str, format: CollectionFormat) -> impl Iterator<Item = &str> {
    raw.split(format.delimiter())
}

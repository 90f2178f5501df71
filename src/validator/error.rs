use crate::spec::{ParameterLocation, ParameterType};
use serde_json::{Number, Value};
use std::fmt;

/// The first violation found while validating a request's parameters.
///
/// Every variant is a client input error. `Display` yields the message that
/// ends up in the problem response `detail`.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required parameter is absent from its location
    MissingParameter {
        location: ParameterLocation,
        name: String,
    },
    /// The raw value could not be coerced to the declared type
    TypeMismatch {
        expected: ParameterType,
        location: ParameterLocation,
        name: String,
    },
    /// The value does not fully match the declared pattern
    PatternMismatch { pattern: String },
    /// Numeric value below `minimum`
    BelowMinimum { minimum: Number },
    /// Numeric value above `maximum`
    AboveMaximum { maximum: Number },
    /// String or array shorter than `minLength`
    TooShort { min_length: usize },
    /// String or array longer than `maxLength`
    TooLong { max_length: usize },
    /// Value not among the declared `enum` values
    NotInEnum { allowed: Vec<Value> },
    /// Strict mode: the request carries parameters the descriptors do not declare
    ExtraParameters {
        location: ParameterLocation,
        names: Vec<String>,
    },
}

impl ValidationError {
    /// Stable tag for logs and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingParameter { .. } => "missing_parameter",
            ValidationError::TypeMismatch { .. } => "type_mismatch",
            ValidationError::PatternMismatch { .. } => "pattern_mismatch",
            ValidationError::BelowMinimum { .. } | ValidationError::AboveMaximum { .. } => {
                "range_violation"
            }
            ValidationError::TooShort { .. } | ValidationError::TooLong { .. } => {
                "length_violation"
            }
            ValidationError::NotInEnum { .. } => "enum_violation",
            ValidationError::ExtraParameters { .. } => "extra_parameter",
        }
    }
}

/// Render enum values as `['a', 'b']`: strings single-quoted, everything else bare JSON.
fn render_enum(values: &[Value]) -> String {
    let items: Vec<String> = values
        .iter()
        .map(|v| match v {
            Value::String(s) => format!("'{s}'"),
            other => other.to_string(),
        })
        .collect();
    format!("[{}]", items.join(", "))
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingParameter { location, name } => {
                write!(f, "Missing {location} parameter '{name}'")
            }
            ValidationError::TypeMismatch {
                expected,
                location,
                name,
            } => write!(
                f,
                "Wrong type, expected '{expected}' for {location} parameter '{name}'"
            ),
            ValidationError::PatternMismatch { pattern } => {
                write!(f, "Invalid value, pattern \"{pattern}\" does not match")
            }
            ValidationError::BelowMinimum { minimum } => {
                write!(f, "Invalid value, must be at least {minimum}")
            }
            ValidationError::AboveMaximum { maximum } => {
                write!(f, "Invalid value, must be at most {maximum}")
            }
            ValidationError::TooShort { min_length } => {
                write!(f, "Length must be at least {min_length}")
            }
            ValidationError::TooLong { max_length } => {
                write!(f, "Length must be at most {max_length}")
            }
            ValidationError::NotInEnum { allowed } => {
                write!(f, "Enum value must be one of {}", render_enum(allowed))
            }
            ValidationError::ExtraParameters { location, names } => write!(
                f,
                "Extra {location} parameter(s) {} not in spec",
                names.join(",")
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

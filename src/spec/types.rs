use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use std::fmt;

/// Where a parameter is carried on the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Body => "body",
        };
        f.write_str(s)
    }
}

/// Declared type of a parameter (or of an array's items).
///
/// Parameters without a `type` are treated as strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Integer,
    Number,
    #[default]
    String,
    Boolean,
    Array,
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParameterType::Integer => "integer",
            ParameterType::Number => "number",
            ParameterType::String => "string",
            ParameterType::Boolean => "boolean",
            ParameterType::Array => "array",
        };
        f.write_str(s)
    }
}

/// How array values are joined in a single query/header/path string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    /// Comma separated: `a,b,c`
    #[default]
    Csv,
    /// Space separated: `a b c`
    Ssv,
    /// Tab separated
    Tsv,
    /// Pipe separated: `a|b|c`
    Pipes,
}

impl CollectionFormat {
    #[must_use]
    pub fn delimiter(self) -> char {
        match self {
            CollectionFormat::Csv => ',',
            CollectionFormat::Ssv => ' ',
            CollectionFormat::Tsv => '\t',
            CollectionFormat::Pipes => '|',
        }
    }
}

/// A compiled regular expression that must match the whole value.
///
/// The source text is kept for error messages; the compiled form is anchored
/// on both ends so `is_match` is a full-string match.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern. Fails on invalid regular expression syntax.
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self { source, regex })
    }

    /// The pattern as written in the descriptor.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(source).map_err(serde::de::Error::custom)
    }
}

/// Optional constraint keywords attached to a parameter or array item.
///
/// An absent keyword means "no constraint". Bounds are kept as JSON numbers
/// so error messages render them exactly as declared (`1.1`, `3`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    pub pattern: Option<Pattern>,
    pub minimum: Option<Number>,
    pub maximum: Option<Number>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    #[serde(rename = "enum")]
    pub allowed: Option<Vec<Value>>,
}

impl Constraints {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
            && self.minimum.is_none()
            && self.maximum.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.allowed.is_none()
    }
}

/// Type, constraints and (for arrays) item schema of a value.
///
/// Shared between top-level parameters and array items so both go through
/// the same coercion and checks.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSchema {
    #[serde(rename = "type", default)]
    pub param_type: ParameterType,
    #[serde(flatten)]
    pub constraints: Constraints,
    #[serde(default)]
    pub items: Option<Box<ValueSchema>>,
    #[serde(default)]
    pub collection_format: CollectionFormat,
}

impl ValueSchema {
    #[must_use]
    pub fn new(param_type: ParameterType) -> Self {
        Self {
            param_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: ValueSchema) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    #[must_use]
    pub fn with_collection_format(mut self, format: CollectionFormat) -> Self {
        self.collection_format = format;
        self
    }
}

/// Declarative metadata for one request parameter.
///
/// Deserializes from the Swagger 2.0 parameter object shape:
///
/// ```rust
/// use brrtguard::spec::{ParameterLocation, ParameterMeta, ParameterType};
///
/// let meta: ParameterMeta = serde_json::from_value(serde_json::json!({
///     "name": "limit", "in": "query", "type": "integer", "maximum": 100
/// })).unwrap();
/// assert_eq!(meta.location, ParameterLocation::Query);
/// assert_eq!(meta.schema.param_type, ParameterType::Integer);
/// assert!(!meta.required);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParameterMeta {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    /// Value used when an optional parameter is absent. Passed through unchecked.
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(flatten)]
    pub schema: ValueSchema,
}

impl ParameterMeta {
    #[must_use]
    pub fn new(name: impl Into<String>, location: ParameterLocation, param_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            location,
            required: false,
            default: None,
            schema: ValueSchema::new(param_type),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.schema.constraints = constraints;
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: ValueSchema) -> Self {
        self.schema.items = Some(Box::new(items));
        self
    }

    #[must_use]
    pub fn with_collection_format(mut self, format: CollectionFormat) -> Self {
        self.schema.collection_format = format;
        self
    }

    #[must_use]
    pub fn param_type(&self) -> ParameterType {
        self.schema.param_type
    }

    #[must_use]
    pub fn constraints(&self) -> &Constraints {
        &self.schema.constraints
    }
}

use super::coerce::{coerce_scalar, split_collection, ParamValue};
use super::error::ValidationError;
use super::rules::check_constraints;
use crate::middleware::Middleware;
use crate::request::{HandlerRequest, RequestValues};
use crate::response::{status_reason, HandlerResponse, Problem};
use crate::runtime_config::ValidatorConfig;
use crate::spec::{ParameterLocation, ParameterMeta, ParameterType, ValueSchema};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Coerced parameter values of a request that passed validation, in descriptor order.
///
/// This is what the wrapped handler receives in place of raw strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedParams {
    values: Vec<(Arc<str>, ParamValue)>,
}

impl ValidatedParams {
    fn insert(&mut self, name: &str, value: ParamValue) {
        self.values.push((Arc::from(name), value));
    }

    /// Value by parameter name. If the same name is declared in two locations,
    /// the later descriptor wins.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_ref(), v))
    }

    /// All values as a JSON object keyed by parameter name.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_json()))
            .collect();
        Value::Object(map)
    }
}

struct ValidatorInner {
    params: Vec<ParameterMeta>,
    declared_query: HashSet<String>,
}

/// Validates request parameters against an immutable descriptor list.
///
/// Built once per route. Cloning is cheap and every call to
/// [`validate`](Self::validate) works only on the request it is given, so one
/// validator can serve concurrent requests.
///
/// ```rust
/// use brrtguard::request::HandlerRequest;
/// use brrtguard::spec::{ParameterLocation, ParameterMeta, ParameterType};
/// use brrtguard::validator::ParameterValidator;
/// use http::Method;
///
/// let validator = ParameterValidator::new(vec![
///     ParameterMeta::new("id", ParameterLocation::Path, ParameterType::Integer).required(),
/// ]);
///
/// let req = HandlerRequest::new(Method::GET, "/pets/7").with_path_param("id", "7");
/// let params = validator.validate(&req).unwrap();
/// assert_eq!(params.get("id").and_then(|v| v.as_i64()), Some(7));
///
/// let req = HandlerRequest::new(Method::GET, "/pets/x").with_path_param("id", "x");
/// assert_eq!(
///     validator.validate(&req).unwrap_err().to_string(),
///     "Wrong type, expected 'integer' for path parameter 'id'"
/// );
/// ```
#[derive(Clone)]
pub struct ParameterValidator {
    inner: Arc<ValidatorInner>,
    config: ValidatorConfig,
}

impl std::fmt::Debug for ParameterValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterValidator")
            .field("params", &self.inner.params)
            .field("config", &self.config)
            .finish()
    }
}

impl ParameterValidator {
    #[must_use]
    pub fn new(params: Vec<ParameterMeta>) -> Self {
        Self::with_config(params, ValidatorConfig::default())
    }

    /// Build with configuration read from `BRRTR_*` environment variables.
    #[must_use]
    pub fn from_env(params: Vec<ParameterMeta>) -> Self {
        Self::with_config(params, ValidatorConfig::from_env())
    }

    #[must_use]
    pub fn with_config(params: Vec<ParameterMeta>, config: ValidatorConfig) -> Self {
        let declared_query = params
            .iter()
            .filter(|p| p.location == ParameterLocation::Query)
            .map(|p| p.name.clone())
            .collect();
        debug!(
            parameter_count = params.len(),
            strict_validation = config.strict_validation,
            "Parameter validator built"
        );
        Self {
            inner: Arc::new(ValidatorInner {
                params,
                declared_query,
            }),
            config,
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &[ParameterMeta] {
        &self.inner.params
    }

    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate every descriptor against `req`, in declaration order.
    ///
    /// Stops at the first violation. On success returns the coerced values of
    /// every parameter present (plus declared defaults of absent ones).
    pub fn validate<R>(&self, req: &R) -> Result<ValidatedParams, ValidationError>
    where
        R: RequestValues + ?Sized,
    {
        let outcome = self.run(req);
        match &outcome {
            Ok(validated) => trace!(
                parameter_count = validated.len(),
                "Request parameters valid"
            ),
            Err(err) => debug!(
                request_id = %req.request_id().map(|id| id.to_string()).unwrap_or_default(),
                kind = err.kind(),
                error = %err,
                "Request parameters rejected"
            ),
        }
        outcome
    }

    fn run<R>(&self, req: &R) -> Result<ValidatedParams, ValidationError>
    where
        R: RequestValues + ?Sized,
    {
        if self.config.strict_validation {
            self.check_extra_query(req)?;
        }
        let mut validated = ValidatedParams::default();
        for param in &self.inner.params {
            if let Some(value) = validate_parameter(param, req)? {
                validated.insert(&param.name, value);
            }
        }
        Ok(validated)
    }

    fn check_extra_query<R>(&self, req: &R) -> Result<(), ValidationError>
    where
        R: RequestValues + ?Sized,
    {
        let mut names: Vec<String> = req
            .query_names()
            .into_iter()
            .filter(|name| !self.inner.declared_query.contains(*name))
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            return Ok(());
        }
        names.sort();
        names.dedup();
        Err(ValidationError::ExtraParameters {
            location: ParameterLocation::Query,
            names,
        })
    }

    /// Problem response for a validation error, `detail` carrying its message.
    #[must_use]
    pub fn problem_response(&self, err: &ValidationError) -> HandlerResponse {
        let status = self.config.problem_status;
        Problem::new(status, status_reason(status), err.to_string()).into_response()
    }

    /// Wrap a handler so it only runs for requests whose parameters validate.
    ///
    /// The returned closure reads the request it is called with, validates it,
    /// and either calls `handler(req, params)` or answers with a problem
    /// response. It captures no per-request state.
    pub fn wrap<R, H>(self, handler: H) -> impl Fn(&R) -> HandlerResponse + Send + Sync
    where
        R: RequestValues + ?Sized,
        H: Fn(&R, ValidatedParams) -> HandlerResponse + Send + Sync,
    {
        move |req: &R| match self.validate(req) {
            Ok(params) => handler(req, params),
            Err(err) => self.problem_response(&err),
        }
    }
}

fn validate_parameter<R>(
    param: &ParameterMeta,
    req: &R,
) -> Result<Option<ParamValue>, ValidationError>
where
    R: RequestValues + ?Sized,
{
    let missing = || ValidationError::MissingParameter {
        location: param.location,
        name: param.name.clone(),
    };

    // Body schemas are validated elsewhere; only presence is checked here.
    if param.location == ParameterLocation::Body {
        return match req.body() {
            Some(body) => Ok(Some(ParamValue::Json(body.clone()))),
            None if param.required => Err(missing()),
            None => Ok(param.default.clone().map(ParamValue::Json)),
        };
    }

    match req.raw_value(param.location, &param.name) {
        Some(raw) => check_value(&param.schema, raw, param).map(Some),
        None if param.required => Err(missing()),
        None => Ok(param.default.clone().map(ParamValue::Json)),
    }
}

/// Coerce `raw` to `schema`'s type and run its constraint checks.
///
/// Arrays recurse into their item schema element by element, so item errors
/// surface verbatim and name the array parameter.
fn check_value(
    schema: &ValueSchema,
    raw: &str,
    param: &ParameterMeta,
) -> Result<ParamValue, ValidationError> {
    let value = match schema.param_type {
        ParameterType::Array => {
            let mut items = Vec::new();
            for part in split_collection(raw, schema.collection_format) {
                let item = match schema.items.as_deref() {
                    Some(item_schema) => check_value(item_schema, part, param)?,
                    None => ParamValue::String(part.to_string()),
                };
                items.push(item);
            }
            ParamValue::Array(items)
        }
        ty => coerce_scalar(ty, raw).ok_or_else(|| ValidationError::TypeMismatch {
            expected: ty,
            location: param.location,
            name: param.name.clone(),
        })?,
    };
    // Coercion ignores surrounding whitespace for non-strings; so does `pattern`.
    let text = match &value {
        ParamValue::String(_) => raw,
        _ => raw.trim(),
    };
    check_constraints(&schema.constraints, text, &value)?;
    Ok(value)
}

/// Rejection-only hook: the coerced values are dropped on success. Handlers
/// that need them go through [`ParameterValidator::wrap`] instead.
impl Middleware for ParameterValidator {
    fn before(&self, req: &HandlerRequest) -> Option<HandlerResponse> {
        self.validate(req)
            .err()
            .map(|err| self.problem_response(&err))
    }
}

//! Read-only request views consumed by the validator.
//!
//! The validator never owns a request; it reads through [`RequestValues`],
//! which any framework request type can implement. [`HandlerRequest`] is the
//! concrete view shipped with the crate.

use http::Method;
use serde::{Serialize, Serializer};
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::spec::ParameterLocation;

/// Maximum inline path/query params before heap allocation
pub const MAX_INLINE_PARAMS: usize = 8;

/// Maximum inline headers before heap allocation
/// Most requests have ≤16 headers (JSF: no heap in hot path)
pub const MAX_INLINE_HEADERS: usize = 16;

/// Stack-allocated name/value pairs for path and query parameters.
///
/// Names are `Arc<str>` so cloning a request does not copy them.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Stack-allocated header storage
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Header carrying a caller supplied request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Strongly typed request identifier backed by ULID.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(pub ulid::Ulid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s).map(RequestId)
    }
}

impl Serialize for RequestId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-location lookup of raw parameter values on a live request.
///
/// Implementations must be cheap, read-only views; the validator calls them
/// once per descriptor on every request.
pub trait RequestValues {
    fn path_param(&self, name: &str) -> Option<&str>;

    fn query_param(&self, name: &str) -> Option<&str>;

    /// Header lookup. Must be case-insensitive (RFC 7230).
    fn header(&self, name: &str) -> Option<&str>;

    fn body(&self) -> Option<&Value>;

    /// Names of all query parameters present, used by strict validation.
    fn query_names(&self) -> Vec<&str>;

    /// Correlation id for logs, if the request carries one.
    fn request_id(&self) -> Option<RequestId> {
        None
    }

    /// Raw string value for a parameter. Body parameters have no raw string form.
    fn raw_value(&self, location: ParameterLocation, name: &str) -> Option<&str> {
        match location {
            ParameterLocation::Path => self.path_param(name),
            ParameterLocation::Query => self.query_param(name),
            ParameterLocation::Header => self.header(name),
            ParameterLocation::Body => None,
        }
    }
}

/// Parse query string parameters from a request target.
///
/// Everything after the first `?` is URL-decoded into name/value pairs, in order.
///
/// ```rust
/// let q = brrtguard::request::parse_query_params("/users?limit=10&tags=a%2Cb");
/// assert_eq!(q[0].1, "10");
/// assert_eq!(q[1].1, "a,b");
/// ```
#[must_use]
pub fn parse_query_params(target: &str) -> ParamVec {
    match target.split_once('?') {
        Some((_, query)) => url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (Arc::from(k.as_ref()), v.into_owned()))
            .collect(),
        None => ParamVec::new(),
    }
}

/// Request data handed to validators, middleware and handlers.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Unique request ID for tracing and correlation
    pub request_id: RequestId,
    pub method: Method,
    /// Request path without the query string
    pub path: String,
    /// Path parameters extracted by the router
    pub path_params: ParamVec,
    pub query_params: ParamVec,
    pub headers: HeaderVec,
    /// Request body parsed as JSON (if present)
    pub body: Option<Value>,
}

impl HandlerRequest {
    /// Build a request from a method and a request target such as `/pets/1?limit=3`.
    ///
    /// The query string is decoded into `query_params`.
    #[must_use]
    pub fn new(method: Method, target: &str) -> Self {
        let path = target.split('?').next().unwrap_or("/").to_string();
        Self {
            request_id: RequestId::new(),
            method,
            path,
            path_params: ParamVec::new(),
            query_params: parse_query_params(target),
            headers: HeaderVec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_path_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.path_params.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn with_query_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query_params.push((Arc::from(name), value.into()));
        self
    }

    /// Add a header. A valid `x-request-id` also replaces the generated request id.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        let value = value.into();
        if name.eq_ignore_ascii_case(REQUEST_ID_HEADER) {
            if let Ok(id) = value.parse() {
                self.request_id = id;
            }
        }
        self.headers.push((Arc::from(name), value));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Get a path parameter by name
    ///
    /// Uses "last write wins" semantics: if duplicate parameter names exist
    /// at different path depths, returns the last occurrence.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name (`?limit=10&limit=20` yields `20`)
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a header by name (case-insensitive per RFC 7230)
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rfind(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl RequestValues for HandlerRequest {
    fn path_param(&self, name: &str) -> Option<&str> {
        self.get_path_param(name)
    }

    fn query_param(&self, name: &str) -> Option<&str> {
        self.get_query_param(name)
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.get_header(name)
    }

    fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    fn query_names(&self) -> Vec<&str> {
        self.query_params.iter().map(|(k, _)| k.as_ref()).collect()
    }

    fn request_id(&self) -> Option<RequestId> {
        Some(self.request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_query_params() {
        let q = parse_query_params("/p?x=1&y=2");
        assert_eq!(q.len(), 2);
        assert_eq!(q[0], (Arc::from("x"), "1".to_string()));
        assert!(parse_query_params("/p").is_empty());
    }

    #[test]
    fn test_new_splits_target() {
        let req = HandlerRequest::new(Method::GET, "/items/5?q1=3&a1=1%2C2");
        assert_eq!(req.path, "/items/5");
        assert_eq!(req.get_query_param("q1"), Some("3"));
        assert_eq!(req.get_query_param("a1"), Some("1,2"));
        assert_eq!(req.query_names(), vec!["q1", "a1"]);
    }

    #[test]
    fn test_last_query_value_wins() {
        let req = HandlerRequest::new(Method::GET, "/x?limit=10&limit=20");
        assert_eq!(req.get_query_param("limit"), Some("20"));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = HandlerRequest::new(Method::GET, "/").with_header("X-Trace", "abc");
        assert_eq!(req.header("x-trace"), Some("abc"));
        assert_eq!(
            req.raw_value(ParameterLocation::Header, "X-TRACE"),
            Some("abc")
        );
    }

    #[test]
    fn test_request_id_header() {
        let id = RequestId::new();
        let req = HandlerRequest::new(Method::GET, "/").with_header("X-Request-Id", id.to_string());
        assert_eq!(req.request_id, id);

        let req = HandlerRequest::new(Method::GET, "/").with_header("x-request-id", "not-a-ulid");
        assert_ne!(req.request_id.to_string(), "not-a-ulid");
    }

    #[test]
    fn test_body_has_no_raw_value() {
        let req = HandlerRequest::new(Method::POST, "/").with_body(json!({"a": 1}));
        assert_eq!(req.raw_value(ParameterLocation::Body, "a"), None);
        assert_eq!(req.body(), Some(&json!({"a": 1})));
    }
}

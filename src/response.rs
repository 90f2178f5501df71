//! Handler responses and RFC 7807 problem details.

use crate::request::HeaderVec;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// Canonical reason phrase for `status`, or `"Unknown"` when it has none.
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

/// Response data returned by handlers, middleware and the validator.
#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    #[serde(skip_serializing)]
    pub headers: HeaderVec,
    pub body: Value,
}

impl HandlerResponse {
    #[must_use]
    pub fn new(status: u16, headers: HeaderVec, body: Value) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Create a JSON response with a `content-type` header
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("content-type"), "application/json".to_string()));
        Self {
            status,
            headers,
            body,
        }
    }

    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    /// Get a header by name
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Add or replace a header (case-insensitive)
    pub fn set_header(&mut self, name: &str, value: String) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((Arc::from(name), value));
    }
}

/// An RFC 7807 problem details body.
///
/// ```rust
/// use brrtguard::response::Problem;
///
/// let res = Problem::new(418, "Some Error", "Something went wrong somewhere")
///     .with_type("http://www.example.com/error")
///     .with_instance("instance1")
///     .with_header("x-Test-Header", "In Test")
///     .into_response();
/// assert_eq!(res.status, 418);
/// assert_eq!(res.body["detail"], "Something went wrong somewhere");
/// assert_eq!(res.get_header("x-test-header"), Some("In Test"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub detail: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    #[serde(skip)]
    headers: HeaderVec,
}

impl Problem {
    #[must_use]
    pub fn new(status: u16, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            problem_type: "about:blank".to_string(),
            title: title.into(),
            detail: detail.into(),
            status,
            instance: None,
            headers: HeaderVec::new(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, problem_type: impl Into<String>) -> Self {
        self.problem_type = problem_type.into();
        self
    }

    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((Arc::from(name), value.into()));
        self
    }

    #[must_use]
    pub fn into_response(self) -> HandlerResponse {
        let body = serde_json::json!({
            "type": self.problem_type,
            "title": self.title,
            "detail": self.detail,
            "status": self.status,
        });
        let mut response = HandlerResponse::new(self.status, self.headers, body);
        if let Some(instance) = self.instance {
            response.body["instance"] = Value::String(instance);
        }
        response.set_header("content-type", PROBLEM_CONTENT_TYPE.to_string());
        response
    }
}

/// Shorthand for a problem response with the default `about:blank` type.
#[must_use]
pub fn problem(status: u16, title: &str, detail: &str) -> HandlerResponse {
    Problem::new(status, title, detail).into_response()
}

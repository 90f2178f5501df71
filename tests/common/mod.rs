#![allow(dead_code)]

use brrtguard::request::HandlerRequest;
use brrtguard::response::HandlerResponse;
use brrtguard::spec::ParameterMeta;
use brrtguard::validator::{ParameterValidator, ValidatedParams};
use http::Method;
use serde_json::json;

/// Descriptors for the `p1`/`h1`/`q1`/`a1` route shared by the integration tests.
pub fn scenario_params() -> Vec<ParameterMeta> {
    serde_json::from_value(json!([
        {"name": "p1", "in": "path", "type": "integer", "required": true},
        {"name": "h1", "in": "header", "type": "string", "enum": ["a", "b"]},
        {"name": "q1", "in": "query", "type": "integer", "maximum": 3},
        {"name": "a1", "in": "query", "type": "array", "items": {"type": "integer", "minimum": 0}}
    ]))
    .expect("scenario descriptors")
}

pub fn ok_handler(_req: &HandlerRequest, _params: ValidatedParams) -> HandlerResponse {
    HandlerResponse::json(200, json!("OK"))
}

/// Wrapped scenario handler reduced to a string: the body on success, the
/// problem `detail` on rejection.
pub fn scenario_handler() -> impl Fn(&HandlerRequest) -> String {
    let wrapped = ParameterValidator::new(scenario_params()).wrap(ok_handler);
    move |req: &HandlerRequest| {
        let res = wrapped(req);
        match res.body.get("detail").and_then(|d| d.as_str()) {
            Some(detail) => detail.to_string(),
            None => res.body.as_str().unwrap_or_default().to_string(),
        }
    }
}

/// GET request for `target`, with the `p1` path parameter when given.
pub fn request(target: &str, p1: Option<&str>) -> HandlerRequest {
    let req = HandlerRequest::new(Method::GET, target);
    match p1 {
        Some(p1) => req.with_path_param("p1", p1),
        None => req,
    }
}

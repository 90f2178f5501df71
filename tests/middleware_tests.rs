mod common;

use brrtguard::middleware::{Middleware, MiddlewareChain, TracingMiddleware};
use brrtguard::request::HandlerRequest;
use brrtguard::response::HandlerResponse;
use brrtguard::runtime_config::ValidatorConfig;
use brrtguard::validator::ParameterValidator;
use common::{request, scenario_params};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct StatusRecorder {
    completed: AtomicUsize,
    last_status: AtomicUsize,
}

impl Middleware for StatusRecorder {
    fn after(&self, _req: &HandlerRequest, res: &mut HandlerResponse, _latency: Duration) {
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.last_status.store(res.status as usize, Ordering::SeqCst);
    }
}

fn chain_with(validator: ParameterValidator, recorder: Arc<StatusRecorder>) -> MiddlewareChain {
    let mut chain = MiddlewareChain::new();
    chain.add(Arc::new(TracingMiddleware));
    chain.add(Arc::new(validator));
    chain.add(recorder);
    chain
}

#[test]
fn test_validator_middleware_short_circuits() {
    let recorder = Arc::new(StatusRecorder::default());
    let chain = chain_with(ParameterValidator::new(scenario_params()), recorder.clone());

    let handled = AtomicUsize::new(0);
    let res = chain.run(&request("/1?q1=4", Some("1")), |_req| {
        handled.fetch_add(1, Ordering::SeqCst);
        HandlerResponse::json(200, json!("OK"))
    });

    assert_eq!(res.status, 400);
    assert_eq!(res.body["detail"], "Invalid value, must be at most 3");
    assert_eq!(handled.load(Ordering::SeqCst), 0);
    assert_eq!(recorder.completed.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.last_status.load(Ordering::SeqCst), 400);
}

#[test]
fn test_validator_middleware_passes_valid_request() {
    let recorder = Arc::new(StatusRecorder::default());
    let chain = chain_with(ParameterValidator::new(scenario_params()), recorder.clone());

    let res = chain.run(&request("/1?q1=2", Some("1")), |_req| {
        HandlerResponse::json(200, json!("OK"))
    });

    assert_eq!(res.status, 200);
    assert_eq!(res.body, json!("OK"));
    assert_eq!(recorder.last_status.load(Ordering::SeqCst), 200);
    assert_eq!(chain.len(), 3);
}

#[test]
fn test_configured_problem_status() {
    let config = ValidatorConfig {
        problem_status: 422,
        ..ValidatorConfig::default()
    };
    let recorder = Arc::new(StatusRecorder::default());
    let chain = chain_with(
        ParameterValidator::with_config(scenario_params(), config),
        recorder.clone(),
    );

    let res = chain.run(&request("/", None), |_req| HandlerResponse::json(200, json!("OK")));

    assert_eq!(res.status, 422);
    assert_eq!(res.body["title"], "Unprocessable Entity");
    assert_eq!(res.body["status"], 422);
    assert_eq!(res.body["detail"], "Missing path parameter 'p1'");
    assert_eq!(recorder.last_status.load(Ordering::SeqCst), 422);
}

#[test]
fn test_problem_title_follows_any_4xx_status() {
    let config = ValidatorConfig {
        problem_status: 429,
        ..ValidatorConfig::default()
    };
    let validator = ParameterValidator::with_config(scenario_params(), config);
    let res = validator.before(&request("/", None)).expect("rejected");
    assert_eq!(res.status, 429);
    assert_eq!(res.body["title"], "Too Many Requests");
    assert_eq!(res.body["status"], 429);
}

#[test]
fn test_validator_hook_only_rejects() {
    let validator = ParameterValidator::new(scenario_params());
    assert!(validator.before(&request("/1?q1=2", Some("1"))).is_none());
}

#[test]
fn test_request_id_header_is_adopted() {
    let id = "01ARZ3NDEKTSV4RRFFQ69G5FAV";
    let req = request("/1", Some("1")).with_header("X-Request-Id", id);
    assert_eq!(req.request_id.to_string(), id);
}

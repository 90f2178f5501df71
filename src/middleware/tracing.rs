use std::time::Duration;

use tracing::{debug, info};

use super::Middleware;
use crate::request::HandlerRequest;
use crate::response::HandlerResponse;

/// Logs each request on entry and its status and latency on exit.
pub struct TracingMiddleware;

impl Middleware for TracingMiddleware {
    fn before(&self, req: &HandlerRequest) -> Option<HandlerResponse> {
        debug!(
            request_id = %req.request_id,
            method = %req.method,
            path = %req.path,
            "Request received"
        );
        None
    }

    fn after(&self, req: &HandlerRequest, res: &mut HandlerResponse, latency: Duration) {
        info!(
            request_id = %req.request_id,
            method = %req.method,
            path = %req.path,
            status = res.status,
            latency_ms = latency.as_millis() as u64,
            "Request completed"
        );
    }
}

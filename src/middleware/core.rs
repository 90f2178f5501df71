use std::time::Duration;

use crate::request::HandlerRequest;
use crate::response::HandlerResponse;

/// Hooks run around a handler.
///
/// `before` may short-circuit the request by returning a response; `after`
/// sees every response, including short-circuited ones.
pub trait Middleware: Send + Sync {
    fn before(&self, _req: &HandlerRequest) -> Option<HandlerResponse> {
        None
    }
    fn after(&self, _req: &HandlerRequest, _res: &mut HandlerResponse, _latency: Duration) {}
}

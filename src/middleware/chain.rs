use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::Middleware;
use crate::request::HandlerRequest;
use crate::response::HandlerResponse;

/// Ordered middleware pipeline in front of a handler.
///
/// Every `before` hook runs in insertion order; the first response returned
/// wins and the handler is skipped. `after` hooks then run in the same order.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add middleware to the end of the pipeline
    pub fn add(&mut self, mw: Arc<dyn Middleware>) {
        self.middlewares.push(mw);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// Run the pipeline for one request.
    pub fn run<H>(&self, req: &HandlerRequest, handler: H) -> HandlerResponse
    where
        H: FnOnce(&HandlerRequest) -> HandlerResponse,
    {
        let start = Instant::now();

        let mut early_resp: Option<HandlerResponse> = None;
        for (idx, mw) in self.middlewares.iter().enumerate() {
            let resp = mw.before(req);
            if early_resp.is_none() && resp.is_some() {
                debug!(
                    request_id = %req.request_id,
                    middleware_index = idx,
                    "Middleware short-circuited request"
                );
                early_resp = resp;
            }
        }

        let mut resp = match early_resp {
            Some(resp) => resp,
            None => handler(req),
        };

        let latency = start.elapsed();
        for mw in &self.middlewares {
            mw.after(req, &mut resp, latency);
        }
        resp
    }
}

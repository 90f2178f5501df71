mod chain;
mod core;
mod tracing;

pub use self::core::Middleware;
pub use chain::MiddlewareChain;
pub use self::tracing::TracingMiddleware;

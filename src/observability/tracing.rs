//! Request tracing for mounted routes.
//!
//! # Responsibilities
//! - Create a span per request served through a compiled route
//! - Expose it as a route middleware so it composes like any other
//!
//! # Design Decisions
//! - Built on tower-http's `TraceLayer`; attach it at the root of a tree to
//!   cover every endpoint

use tower_http::trace::TraceLayer;

use crate::routing::Middleware;

/// Middleware that opens a `tower_http` trace span around each request.
pub fn trace_middleware() -> Middleware {
    Middleware::layer(TraceLayer::new_for_http()).named("trace")
}

//! Registration targets for compiled routes.
//!
//! # Responsibilities
//! - Define the `"<METHOD> <path>"` pattern handed to a multiplexer
//! - Register composed handlers into an axum `Router`
//! - Record compiled entries in a plain table for inspection
//!
//! # Design Decisions
//! - Paths are passed through verbatim; parameter syntax such as `{id}`
//!   is interpreted by the multiplexer alone
//! - Duplicate or malformed patterns are not checked here; whatever the
//!   multiplexer does with them (axum panics) is what the caller sees
//! - Handlers registered on the same path merge into one method router,
//!   the wildcard becoming the fallback for unregistered methods
//! - Extension methods (`PURGE`, ...) have no axum filter; they take the
//!   fallback slot behind a method check, so a path holds at most one of
//!   them and no wildcard alongside it

use std::fmt;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{any_service, on_service, MethodFilter};
use tower::{service_fn, ServiceExt};

use crate::routing::handler::Handler;
use crate::routing::route::MethodToken;

/// Pattern under which one compiled handler is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    method: MethodToken,
    path: String,
}

impl Pattern {
    pub fn new(method: MethodToken, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    pub fn method(&self) -> &MethodToken {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// `"GET /api/foo"`, or just `"/api/foo"` for the wildcard method.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.method.is_any() {
            f.write_str(&self.path)
        } else {
            write!(f, "{} {}", self.method, self.path)
        }
    }
}

/// A request multiplexer that compiled routes can be registered into.
pub trait Mux: Sized {
    /// Register `handler` under `pattern`.
    fn handle(self, pattern: &Pattern, handler: Handler) -> Self;
}

impl<S> Mux for axum::Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn handle(self, pattern: &Pattern, handler: Handler) -> Self {
        let method_router = match pattern.method().method() {
            None => any_service(handler),
            Some(method) => match MethodFilter::try_from(method.clone()) {
                Ok(filter) => on_service(filter, handler),
                Err(_) => any_service(extension_method(method.clone(), handler)),
            },
        };
        self.route(pattern.path(), method_router)
    }
}

/// Serve `handler` for requests using `method` only; anything else gets a
/// 405 naming the allowed method.
fn extension_method(method: Method, handler: Handler) -> Handler {
    let name = handler.name().to_owned();
    Handler::from_service(service_fn(move |req: Request<Body>| {
        let handler = handler.clone();
        let allowed = method.clone();
        async move {
            if req.method() == allowed {
                handler.oneshot(req).await
            } else {
                Ok((
                    StatusCode::METHOD_NOT_ALLOWED,
                    [(header::ALLOW, allowed.to_string())],
                )
                    .into_response())
            }
        }
    }))
    .named(name)
}

/// Compiled entries in registration order.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<(Pattern, Handler)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[(Pattern, Handler)] {
        &self.entries
    }

    pub fn patterns(&self) -> impl Iterator<Item = &Pattern> {
        self.entries.iter().map(|(pattern, _)| pattern)
    }

    /// First handler registered under `pattern`.
    pub fn get(&self, pattern: &Pattern) -> Option<&Handler> {
        self.entries
            .iter()
            .find(|(registered, _)| registered == pattern)
            .map(|(_, handler)| handler)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Mux for RouteTable {
    fn handle(mut self, pattern: &Pattern, handler: Handler) -> Self {
        self.entries.push((pattern.clone(), handler));
        self
    }
}

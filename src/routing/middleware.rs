//! Handler-transforming middleware and its composition.
//!
//! # Responsibilities
//! - Represent a middleware as a function from "next handler" to "new handler"
//! - Adapt tower layers (axum `from_fn`, tower-http layers) into that shape
//! - Compose an ordered list into a single transform
//!
//! # Design Decisions
//! - Composition folds from the last element to the first, so list order is
//!   also execution order: the first middleware sees the request first
//! - The empty list composes to the identity transform
//! - Shared via `Arc`: cloning a route tree or a compiled table never
//!   duplicates the transform itself

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::IntoResponse;
use tower::{Layer, Service};

use crate::routing::handler::Handler;

type Transform = dyn Fn(Handler) -> Handler + Send + Sync;

/// A handler transform attached to a route.
#[derive(Clone)]
pub struct Middleware {
    transform: Arc<Transform>,
    name: Cow<'static, str>,
}

impl Middleware {
    /// Wrap a raw handler transform.
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(Handler) -> Handler + Send + Sync + 'static,
    {
        Self {
            transform: Arc::new(transform),
            name: Cow::Borrowed(std::any::type_name::<F>()),
        }
    }

    /// Adapt a tower [`Layer`] into a middleware.
    ///
    /// The wrapped handler keeps the name of the handler it decorates, so
    /// inspection still reports the endpoint and not the layer stack.
    pub fn layer<L>(layer: L) -> Self
    where
        L: Layer<Handler> + Send + Sync + 'static,
        L::Service: Service<Request<Body>, Error = Infallible> + Clone + Send + Sync + 'static,
        <L::Service as Service<Request<Body>>>::Response: IntoResponse + 'static,
        <L::Service as Service<Request<Body>>>::Future: Send + 'static,
    {
        let name = std::any::type_name::<L>();
        Self::new(move |next: Handler| {
            let endpoint = next.name().to_owned();
            Handler::from_service(layer.layer(next)).named(endpoint)
        })
        .named(name)
    }

    /// Replace the diagnostic name.
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Diagnostic name (the transform's type name unless overridden).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wrap `next` with this middleware.
    pub fn apply(&self, next: Handler) -> Handler {
        (self.transform)(next)
    }

    /// True when both values share the same underlying transform.
    pub fn ptr_eq(&self, other: &Middleware) -> bool {
        Arc::ptr_eq(&self.transform, &other.transform)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Wrap `handler` with `middlewares`, equivalent to `m0(m1(...mN-1(handler)))`.
pub fn apply_all(middlewares: &[Middleware], handler: Handler) -> Handler {
    middlewares
        .iter()
        .rev()
        .fold(handler, |next, middleware| middleware.apply(next))
}

/// Collapse an ordered middleware list into a single middleware.
pub fn compose(middlewares: &[Middleware]) -> Middleware {
    let name = middlewares
        .iter()
        .map(Middleware::name)
        .collect::<Vec<_>>()
        .join(" -> ");
    let chain: Arc<[Middleware]> = middlewares.into();
    Middleware::new(move |handler| apply_all(&chain, handler)).named(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::middleware::{from_fn, Next};
    use axum::response::Response;
    use std::sync::Mutex;
    use tower::ServiceExt;

    type Trace = Arc<Mutex<Vec<&'static str>>>;

    fn tracker(name: &'static str, trace: Trace) -> Middleware {
        Middleware::layer(from_fn(move |req: Request<Body>, next: Next| {
            let trace = trace.clone();
            async move {
                trace.lock().unwrap().push(name);
                next.run(req).await
            }
        }))
        .named(name)
    }

    fn terminal(trace: Trace) -> Handler {
        Handler::new(move || {
            let trace = trace.clone();
            async move {
                trace.lock().unwrap().push("handler");
                "done"
            }
        })
    }

    async fn call(handler: Handler) -> Response {
        handler
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_order_is_execution_order() {
        let trace = Trace::default();
        let chain = vec![
            tracker("m0", trace.clone()),
            tracker("m1", trace.clone()),
            tracker("m2", trace.clone()),
        ];

        call(apply_all(&chain, terminal(trace.clone()))).await;

        assert_eq!(*trace.lock().unwrap(), vec!["m0", "m1", "m2", "handler"]);
    }

    #[tokio::test]
    async fn test_compose_matches_apply_all() {
        let trace = Trace::default();
        let composed = compose(&[tracker("a", trace.clone()), tracker("b", trace.clone())]);
        assert_eq!(composed.name(), "a -> b");

        call(composed.apply(terminal(trace.clone()))).await;

        assert_eq!(*trace.lock().unwrap(), vec!["a", "b", "handler"]);
    }

    #[tokio::test]
    async fn test_empty_list_is_identity() {
        let trace = Trace::default();
        let handler = terminal(trace.clone()).named("terminal");

        let wrapped = compose(&[]).apply(handler);
        assert_eq!(wrapped.name(), "terminal");

        call(wrapped).await;
        assert_eq!(*trace.lock().unwrap(), vec!["handler"]);
    }

    #[test]
    fn test_layer_keeps_endpoint_name() {
        let trace = Trace::default();
        let wrapped = tracker("outer", trace.clone()).apply(terminal(trace).named("endpoint"));
        assert_eq!(wrapped.name(), "endpoint");
    }

    #[test]
    fn test_clone_shares_transform() {
        let mw = Middleware::new(|next| next);
        let other = Middleware::new(|next| next);
        assert!(mw.ptr_eq(&mw.clone()));
        assert!(!mw.ptr_eq(&other));
    }
}

//! Terminal request handlers.
//!
//! # Responsibilities
//! - Erase the concrete type of axum handlers and tower services
//! - Carry a diagnostic name for route inspection
//!
//! # Design Decisions
//! - Stored as a boxed, cloneable, `Send + Sync` tower service so the same
//!   handler can be registered into any number of mounted routers
//! - Error type is `Infallible`: failures are expressed as responses

use std::borrow::Cow;
use std::convert::Infallible;
use std::fmt;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use tower::util::BoxCloneSyncService;
use tower::{Service, ServiceExt};

/// Boxed service behind every [`Handler`].
pub type BoxedHandler = BoxCloneSyncService<Request<Body>, Response, Infallible>;

/// A request handler that can be attached to a route.
#[derive(Clone)]
pub struct Handler {
    service: BoxedHandler,
    name: Cow<'static, str>,
}

impl Handler {
    /// Wrap an axum handler (async fn or closure).
    pub fn new<H, T>(handler: H) -> Self
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        let service = axum::handler::Handler::with_state(handler, ());
        Self {
            service: BoxCloneSyncService::new(service),
            name: Cow::Borrowed(std::any::type_name::<H>()),
        }
    }

    /// Wrap any tower service whose response converts into an HTTP response.
    pub fn from_service<S>(service: S) -> Self
    where
        S: Service<Request<Body>, Error = Infallible> + Clone + Send + Sync + 'static,
        S::Response: IntoResponse + 'static,
        S::Future: Send + 'static,
    {
        let service = service.map_response(<S::Response as IntoResponse>::into_response);
        Self {
            service: BoxCloneSyncService::new(service),
            name: Cow::Borrowed(std::any::type_name::<S>()),
        }
    }

    /// Replace the diagnostic name.
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Diagnostic name (the handler's type name unless overridden).
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Service<Request<Body>> for Handler {
    type Response = Response;
    type Error = Infallible;
    type Future = <BoxedHandler as Service<Request<Body>>>::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        self.service.call(req)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn hello() -> &'static str {
        "hello"
    }

    async fn body_of(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_handler_serves_axum_fn() {
        let handler = Handler::new(hello);
        let response = handler
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_of(response).await, "hello");
    }

    #[tokio::test]
    async fn test_handler_from_service() {
        let service = tower::service_fn(|_req: Request<Body>| async {
            Ok::<_, Infallible>((StatusCode::ACCEPTED, "queued"))
        });
        let handler = Handler::from_service(service);
        let response = handler
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(body_of(response).await, "queued");
    }

    #[test]
    fn test_handler_names() {
        let handler = Handler::new(hello);
        assert!(handler.name().ends_with("hello"));

        let handler = handler.named("greeting");
        assert_eq!(handler.name(), "greeting");
        assert!(format!("{handler:?}").contains("greeting"));
    }
}

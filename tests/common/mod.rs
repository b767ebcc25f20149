//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::middleware::{from_fn, Next};
use axum::Router;
use routetree::{Handler, Middleware};
use tower::ServiceExt;

/// Execution log shared by trackers and handlers.
pub type Trace = Arc<Mutex<Vec<&'static str>>>;

pub fn new_trace() -> Trace {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(trace: &Trace) -> Vec<&'static str> {
    trace.lock().unwrap().clone()
}

/// Send one request through `router` and collect status and body.
pub async fn send(router: Router, method: Method, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Middleware that records `name` before delegating.
pub fn tracker(name: &'static str, trace: Trace) -> Middleware {
    Middleware::layer(from_fn(move |req: Request<Body>, next: Next| {
        let trace = trace.clone();
        async move {
            trace.lock().unwrap().push(name);
            next.run(req).await
        }
    }))
    .named(name)
}

/// Handler that records `name` and answers with it.
pub fn recording_handler(name: &'static str, trace: Trace) -> Handler {
    Handler::new(move || {
        let trace = trace.clone();
        async move {
            trace.lock().unwrap().push(name);
            name
        }
    })
    .named(name)
}

//! Sample route trees served by the `routetree` binary and listed by
//! `route-table`.
//!
//! Each tree shows one aspect of route composition:
//! - `composition`: nested sub-routes with global, API and per-group middlewares
//! - `middleware`: a middleware stack in front of a single endpoint
//! - `debugging`: a small tree whose endpoint table is meant to be printed

use std::future::{ready, Ready};

use axum::body::Body;
use axum::extract::Path;
use axum::http::{Method, Request};
use axum::middleware::{from_fn, Next};
use serde::{Deserialize, Serialize};

use crate::routing::{Handler, MethodToken, Middleware, Route};

/// Selects one of the sample trees.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DemoKind {
    #[default]
    Composition,
    Middleware,
    Debugging,
}

impl DemoKind {
    pub fn build(self) -> Route {
        match self {
            DemoKind::Composition => composition(),
            DemoKind::Middleware => middleware_usage(),
            DemoKind::Debugging => debugging(),
        }
    }
}

/// Middleware that logs its own name before delegating.
pub fn logging_middleware(name: &'static str) -> Middleware {
    Middleware::layer(from_fn(move |req: Request<Body>, next: Next| async move {
        tracing::info!(
            middleware = name,
            method = %req.method(),
            path = %req.uri().path(),
            "Executing middleware"
        );
        next.run(req).await
    }))
    .named(name)
}

/// Middleware that logs before and after the rest of the chain.
pub fn request_logger(name: &'static str) -> Middleware {
    Middleware::layer(from_fn(move |req: Request<Body>, next: Next| async move {
        let method = req.method().clone();
        let path = req.uri().path().to_owned();
        tracing::info!(middleware = name, "Request logger start");
        let response = next.run(req).await;
        tracing::info!(
            middleware = name,
            method = %method,
            path = %path,
            status = %response.status(),
            "Request logger done"
        );
        response
    }))
    .named(name)
}

fn respond(
    text: &'static str,
) -> impl Fn() -> Ready<&'static str> + Clone + Send + Sync + 'static {
    move || {
        tracing::info!(handler = text, "Executing handler");
        ready(text)
    }
}

fn endpoint(method: Method, text: &'static str) -> Route {
    Route::endpoint(method, Some(Handler::new(respond(text)).named(text)))
}

fn all(text: &'static str) -> Route {
    Route::endpoint(MethodToken::ANY, Some(Handler::new(respond(text)).named(text)))
}

async fn qux_by_id(Path(qux_id): Path<String>) -> String {
    tracing::info!(qux_id = %qux_id, "Executing QuxHandler by ID");
    format!("QuxHandler by ID {qux_id}")
}

/// Nested sub-routes sharing global and API-level middlewares.
pub fn composition() -> Route {
    let foo_subroute = Route::new("")
        .with([logging_middleware("FooMiddleware")])
        .add([
            Route::new("/foo").add([endpoint(Method::GET, "FooHandler")]),
            Route::new("/foo/qux").add([endpoint(Method::GET, "QuxHandler")]),
            Route::new("/foo/qux/{qux_id}")
                .add([Route::get(qux_by_id).with([logging_middleware("QuxIdMiddleware")])]),
        ]);

    let bar_subroute = Route::new("/bar")
        .with([logging_middleware("BarMiddleware")])
        .add([
            Route::new("/baz").add([
                endpoint(Method::GET, "GetBazHandler"),
                endpoint(Method::POST, "PostBazHandler"),
            ]),
            Route::new("/baz/{baz_id}").add([
                endpoint(Method::PATCH, "PatchBazHandler by ID"),
                endpoint(Method::DELETE, "DeleteBazHandler by ID"),
            ]),
        ]);

    Route::new("")
        .with([
            logging_middleware("GlobalMiddleware1"),
            logging_middleware("GlobalMiddleware2"),
        ])
        .add([Route::new("/api/v1")
            .with([logging_middleware("APIv1Middleware")])
            .add([
                foo_subroute,
                bar_subroute,
                Route::new("/foobar").add([all("FooBarHandler")]),
            ])])
}

/// A middleware stack in front of one endpoint.
pub fn middleware_usage() -> Route {
    Route::new("/api/foo")
        .with([
            logging_middleware("FirstMiddleware"),
            logging_middleware("SecondMiddleware"),
            request_logger("ThirdMiddlewareLogger"),
        ])
        .add([endpoint(Method::GET, "Handler getFoo")])
}

pub async fn get_foo_handler() -> &'static str {
    tracing::info!("GetFooHandler");
    "getFooHandler"
}

pub async fn post_bar_handler() -> &'static str {
    tracing::info!("PostBarHandler");
    "postBarHandler"
}

/// A small tree for printing the endpoint table.
pub fn debugging() -> Route {
    Route::new("/api")
        .with([logging_middleware("GeneralMiddleware")])
        .add([
            Route::new("/foo")
                .with([logging_middleware("FooMiddleware")])
                .add([Route::get(get_foo_handler).with([logging_middleware("GetFooMiddleware")])]),
            Route::new("/bar")
                .with([logging_middleware("BarMiddleware")])
                .add([Route::post(post_bar_handler)]),
        ])
}

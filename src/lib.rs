//! Composable route trees compiled onto an HTTP multiplexer.
//!
//! A [`Route`] carries an optional path segment, an ordered middleware list,
//! child routes and an optional method-bound handler. Mounting walks the
//! tree once, concatenating paths and accumulating middlewares, and registers
//! every handler under a `"<METHOD> <path>"` pattern on an [`axum::Router`]
//! (or any other [`routing::Mux`]).
//!
//! ```text
//! Route tree ──mount──▶ axum::Router ──serve──▶ requests
//!      └──endpoints──▶ EndpointInfo table (route-table CLI)
//! ```

pub mod config;
pub mod demo;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use error::RouteError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{EndpointInfo, Handler, MethodToken, Middleware, Route};

//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Construction (at startup):
//!     Route::new / Route::get / ...
//!     → with(middlewares), add(children)   (append-only)
//!
//! Route Compilation:
//!     Route tree
//!     → compiler.rs (pre-order walk, accumulate path + middlewares)
//!     → middleware.rs (compose chain around each handler)
//!     → mux.rs (register "<METHOD> <path>" → handler)
//!     → axum::Router (matching and dispatch at request time)
//! ```
//!
//! # Design Decisions
//! - Build then mount: the tree is mutated only while building, and
//!   mounting borrows it read-only
//! - Path syntax is never parsed here; the multiplexer owns matching
//! - Middleware list order is request-time execution order

pub mod compiler;
pub mod handler;
pub mod inspect;
pub mod middleware;
pub mod mux;
pub mod route;

pub use handler::Handler;
pub use inspect::EndpointInfo;
pub use middleware::{apply_all, compose, Middleware};
pub use mux::{Mux, Pattern, RouteTable};
pub use route::{MethodToken, Route};

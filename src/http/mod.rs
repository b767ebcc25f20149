//! HTTP hosting for mounted route trees.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum::serve)
//!     → axum::Router built by Route::mount
//!     → composed middleware chain → endpoint handler
//! ```

pub mod server;

pub use server::HttpServer;

//! Lifecycle management for the demo server.
//!
//! # Data Flow
//! ```text
//! SIGINT/SIGTERM → Shutdown::listen_for_signals → Shutdown::trigger
//!     → HttpServer::run (waiting on Shutdown::wait) drains and exits
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;

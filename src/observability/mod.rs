//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Route compilation:
//!     → compiler.rs emits debug events per registered pattern
//!
//! Request time:
//!     → tracing.rs (span per request, via a route middleware)
//!     → demo middlewares log their own execution
//!
//! Consumers:
//!     → logging.rs subscriber (stdout)
//! ```
//!
//! # Design Decisions
//! - Structured fields (pattern, method, path) rather than formatted text
//! - Filter configurable via config and environment

pub mod logging;
pub mod tracing;

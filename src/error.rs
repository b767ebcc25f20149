//! Route construction errors.
//!
//! Every variant signals a programmer error in how the route tree was
//! assembled. The panicking builders (`with`, `add`, `mount_and_walk`)
//! panic with the `Display` text of these values; the `try_*` variants
//! hand them back instead.

use thiserror::Error;

/// Error raised while building or mounting a route tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// An absent middleware was passed to `with`/`try_with`.
    #[error("middlewares parameter cannot contain absent middlewares (index {index})")]
    NullMiddleware { index: usize },

    /// An absent child route was passed to `add`/`try_add`.
    #[error("routes parameter cannot contain absent routes (index {index})")]
    NullRoute { index: usize },

    /// `mount_and_walk` was called without a walk function.
    #[error("walk function parameter cannot be absent")]
    MissingWalkFn,
}

//! Route tree nodes.
//!
//! # Responsibilities
//! - Hold one path segment, its middlewares, its children and an optional
//!   `(method, handler)` pair
//! - Provide append-only builder operations
//! - Provide one constructor per HTTP method plus a wildcard
//!
//! # Design Decisions
//! - Children are owned by their parent; the tree has no back references
//! - Paths are stored verbatim and concatenated at mount time, never
//!   normalized (`"/api"` + `"foo"` is `"/apifoo"`)
//! - Absent middlewares and children are programmer errors: the whole call
//!   is rejected before anything is appended

use std::fmt;

use axum::http::Method;
use serde::{Serialize, Serializer};

use crate::error::RouteError;
use crate::routing::handler::Handler;
use crate::routing::middleware::Middleware;

/// HTTP method a route answers to. The empty token matches any method not
/// registered explicitly for the same path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MethodToken(Option<Method>);

impl MethodToken {
    /// The wildcard (empty) token.
    pub const ANY: MethodToken = MethodToken(None);

    pub fn new(method: Method) -> Self {
        Self(Some(method))
    }

    /// The concrete method, or `None` for the wildcard.
    pub fn method(&self) -> Option<&Method> {
        self.0.as_ref()
    }

    pub fn is_any(&self) -> bool {
        self.0.is_none()
    }

    /// Method name, empty for the wildcard.
    pub fn as_str(&self) -> &str {
        self.0.as_ref().map_or("", Method::as_str)
    }
}

impl From<Method> for MethodToken {
    fn from(method: Method) -> Self {
        Self::new(method)
    }
}

impl fmt::Display for MethodToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MethodToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A node of the route tree.
///
/// Built with [`Route::new`] or one of the per-method constructors, grown
/// with [`Route::with`] and [`Route::add`], then compiled with
/// [`Route::mount`]. A mounted router is a snapshot: changing the tree
/// afterwards only affects later mounts.
#[derive(Debug, Clone, Default)]
pub struct Route {
    path: String,
    middlewares: Vec<Middleware>,
    routes: Vec<Route>,
    handler: Option<Handler>,
    method: MethodToken,
}

impl Route {
    /// Create an empty node for the given path segment.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Create a path-less node answering `method` with `handler`.
    ///
    /// An absent handler is accepted; such a node never produces a
    /// registration. Extension methods such as `PURGE` are accepted too;
    /// mounted into axum, a path can carry only one of them.
    pub fn endpoint(method: impl Into<MethodToken>, handler: Option<Handler>) -> Self {
        Self {
            handler,
            method: method.into(),
            ..Self::default()
        }
    }

    pub fn get<H, T>(handler: H) -> Self
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        Self::endpoint(Method::GET, Some(Handler::new(handler)))
    }

    pub fn head<H, T>(handler: H) -> Self
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        Self::endpoint(Method::HEAD, Some(Handler::new(handler)))
    }

    pub fn post<H, T>(handler: H) -> Self
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        Self::endpoint(Method::POST, Some(Handler::new(handler)))
    }

    pub fn put<H, T>(handler: H) -> Self
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        Self::endpoint(Method::PUT, Some(Handler::new(handler)))
    }

    pub fn patch<H, T>(handler: H) -> Self
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        Self::endpoint(Method::PATCH, Some(Handler::new(handler)))
    }

    pub fn delete<H, T>(handler: H) -> Self
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        Self::endpoint(Method::DELETE, Some(Handler::new(handler)))
    }

    pub fn connect<H, T>(handler: H) -> Self
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        Self::endpoint(Method::CONNECT, Some(Handler::new(handler)))
    }

    pub fn options<H, T>(handler: H) -> Self
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        Self::endpoint(Method::OPTIONS, Some(Handler::new(handler)))
    }

    pub fn trace<H, T>(handler: H) -> Self
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        Self::endpoint(Method::TRACE, Some(Handler::new(handler)))
    }

    /// Handler for every method not registered explicitly on the same path.
    pub fn all<H, T>(handler: H) -> Self
    where
        H: axum::handler::Handler<T, ()>,
        T: 'static,
    {
        Self::endpoint(MethodToken::ANY, Some(Handler::new(handler)))
    }

    /// Append middlewares that run before this node's handler and every
    /// descendant's handler, in the order given.
    ///
    /// # Panics
    /// If any element is `None`. Nothing is appended in that case.
    #[must_use]
    #[track_caller]
    pub fn with<I>(mut self, middlewares: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Middleware>>,
    {
        if let Err(err) = self.try_with(middlewares) {
            panic!("{err}");
        }
        self
    }

    /// Append child routes, in the order given.
    ///
    /// # Panics
    /// If any element is `None`. Nothing is appended in that case.
    #[must_use]
    #[track_caller]
    pub fn add<I>(mut self, routes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<Route>>,
    {
        if let Err(err) = self.try_add(routes) {
            panic!("{err}");
        }
        self
    }

    /// Fallible form of [`Route::with`].
    pub fn try_with<I>(&mut self, middlewares: I) -> Result<&mut Self, RouteError>
    where
        I: IntoIterator,
        I::Item: Into<Option<Middleware>>,
    {
        let middlewares = all_present::<Middleware, _, _>(middlewares, |index| {
            RouteError::NullMiddleware { index }
        })?;
        self.middlewares.extend(middlewares);
        Ok(self)
    }

    /// Fallible form of [`Route::add`].
    pub fn try_add<I>(&mut self, routes: I) -> Result<&mut Self, RouteError>
    where
        I: IntoIterator,
        I::Item: Into<Option<Route>>,
    {
        let routes = all_present::<Route, _, _>(routes, |index| RouteError::NullRoute { index })?;
        self.routes.extend(routes);
        Ok(self)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn middlewares(&self) -> &[Middleware] {
        &self.middlewares
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }

    pub fn method(&self) -> &MethodToken {
        &self.method
    }
}

fn all_present<T, I, F>(items: I, absent: F) -> Result<Vec<T>, RouteError>
where
    I: IntoIterator,
    F: Fn(usize) -> RouteError,
    I::Item: Into<Option<T>>,
{
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| Into::<Option<T>>::into(item).ok_or_else(|| absent(index)))
        .collect()
}

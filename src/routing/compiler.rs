//! Route tree compilation.
//!
//! # Data Flow
//! ```text
//! Route (root)
//!     → depth-first, pre-order, left-to-right walk
//!     → per node: path = parent path + own segment
//!                 middlewares = parent middlewares + own middlewares
//!     → walk callback (sees the parent's accumulated state)
//!     → handler present? register "<METHOD> <path>" → composed handler
//!     → recurse into children
//!     → Mux (axum::Router by default)
//! ```
//!
//! # Design Decisions
//! - The tree is only borrowed; mounting never mutates it
//! - Compiled handlers hold their own clones of every middleware, so a
//!   mounted router does not observe later changes to the tree
//! - No validation: handler-less nodes are skipped, conflicts are left to
//!   the multiplexer

use crate::error::RouteError;
use crate::routing::handler::Handler;
use crate::routing::middleware::{apply_all, Middleware};
use crate::routing::mux::{Mux, Pattern};
use crate::routing::route::Route;

type WalkFn<'a> = dyn FnMut(&Route, &str, &[Middleware]) + 'a;

fn inspect_route<M: Mux>(
    route: &Route,
    path: &str,
    middlewares: &[Middleware],
    mut mux: M,
    mut walk: Option<&mut WalkFn<'_>>,
) -> M {
    let chained_path = format!("{path}{}", route.path());
    let chained_middlewares: Vec<Middleware> = middlewares
        .iter()
        .chain(route.middlewares())
        .cloned()
        .collect();

    if let Some(walk) = walk.as_deref_mut() {
        walk(route, path, middlewares);
    }

    match route.handler() {
        Some(handler) => {
            let pattern = Pattern::new(route.method().clone(), chained_path.as_str());
            tracing::debug!(
                pattern = %pattern,
                middlewares = chained_middlewares.len(),
                handler = handler.name(),
                "Registering route"
            );
            mux = mux.handle(&pattern, apply_all(&chained_middlewares, handler.clone()));
        }
        None => {
            tracing::trace!(path = %chained_path, children = route.routes().len(), "No handler on route");
        }
    }

    for child in route.routes() {
        mux = inspect_route(child, &chained_path, &chained_middlewares, mux, walk.as_deref_mut());
    }

    mux
}

impl Route {
    /// Compile the tree into a fresh axum router.
    ///
    /// Mounting performs no validation: a tree without handlers yields an
    /// empty router, and nodes without handlers are skipped.
    pub fn mount(&self) -> axum::Router {
        self.mount_into(axum::Router::new())
    }

    /// Same as [`Route::mount`], calling `walk` for every node visited.
    ///
    /// `walk` receives the node together with the path and middlewares
    /// accumulated by its ancestors, excluding the node's own contribution.
    ///
    /// # Panics
    /// If `walk` is `None`, before any node is visited.
    #[track_caller]
    pub fn mount_and_walk<F>(&self, walk: Option<F>) -> axum::Router
    where
        F: FnMut(&Route, &str, &[Middleware]),
    {
        match self.try_mount_and_walk(walk) {
            Ok(router) => router,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible form of [`Route::mount_and_walk`].
    pub fn try_mount_and_walk<F>(&self, walk: Option<F>) -> Result<axum::Router, RouteError>
    where
        F: FnMut(&Route, &str, &[Middleware]),
    {
        self.try_mount_into_and_walk(axum::Router::new(), walk)
    }

    /// Compile the tree into an arbitrary multiplexer.
    pub fn mount_into<M: Mux>(&self, mux: M) -> M {
        inspect_route(self, "", &[], mux, None)
    }

    /// Compile the tree into an arbitrary multiplexer, calling `walk` for
    /// every node visited.
    pub fn try_mount_into_and_walk<M, F>(&self, mux: M, walk: Option<F>) -> Result<M, RouteError>
    where
        M: Mux,
        F: FnMut(&Route, &str, &[Middleware]),
    {
        let mut walk = walk.ok_or(RouteError::MissingWalkFn)?;
        let walk: &mut WalkFn<'_> = &mut walk;
        Ok(inspect_route(self, "", &[], mux, Some(walk)))
    }

    /// Visit every node in mount order without registering anything.
    pub fn walk<F>(&self, mut walk: F)
    where
        F: FnMut(&Route, &str, &[Middleware]),
    {
        inspect_route(self, "", &[], Discard, Some(&mut walk as &mut WalkFn<'_>));
    }
}

/// Multiplexer that drops every registration.
struct Discard;

impl Mux for Discard {
    fn handle(self, _pattern: &Pattern, _handler: Handler) -> Self {
        self
    }
}

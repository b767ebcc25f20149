//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Assemble the configured route tree under server-wide middlewares
//! - Mount it into an axum router
//! - Serve it on a listener until shutdown is signalled

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use crate::config::ServerConfig;
use crate::lifecycle::Shutdown;
use crate::observability::tracing::trace_middleware;
use crate::routing::{Middleware, Route};

/// HTTP server hosting one mounted route tree.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Build and mount the route tree selected by the configuration.
    pub fn new(config: ServerConfig) -> Self {
        let tree = Self::build_tree(&config);

        if config.routes.print_table {
            for endpoint in tree.endpoints() {
                tracing::info!(
                    pattern = %endpoint.pattern,
                    middlewares = ?endpoint.middlewares,
                    handler = %endpoint.handler,
                    "Endpoint"
                );
            }
        }

        let router = tree.mount();
        Self { router, config }
    }

    /// Server-wide middlewares wrap the selected demo tree.
    #[allow(deprecated)]
    fn build_tree(config: &ServerConfig) -> Route {
        let timeout = Duration::from_secs(config.timeouts.request_secs);
        Route::new("")
            .with([
                trace_middleware(),
                Middleware::layer(TimeoutLayer::new(timeout)).named("timeout"),
            ])
            .add([config.routes.demo.build()])
    }

    /// Run the server until `shutdown` is triggered, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: Arc<Shutdown>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            demo = ?self.config.routes.demo,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The mounted router.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::DemoKind;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_server_mounts_selected_demo() {
        let mut config = ServerConfig::default();
        config.routes.demo = DemoKind::Debugging;
        let server = HttpServer::new(config);

        let response = server
            .router()
            .clone()
            .oneshot(Request::post("/api/bar").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = server
            .router()
            .clone()
            .oneshot(Request::get("/api/v1/foo").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_server_middlewares_run_first() {
        let tree = HttpServer::build_tree(&ServerConfig::default());
        let endpoints = tree.endpoints();
        assert!(!endpoints.is_empty());
        for endpoint in endpoints {
            assert_eq!(&endpoint.middlewares[..2], ["trace", "timeout"]);
        }
    }
}

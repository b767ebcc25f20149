//! Endpoint reports for debugging route trees.

use std::fmt;

use serde::Serialize;

use crate::routing::middleware::Middleware;
use crate::routing::mux::Pattern;
use crate::routing::route::Route;

/// One compiled endpoint: its pattern and the middleware chain in
/// execution order, followed by the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointInfo {
    pub pattern: String,
    pub method: String,
    pub path: String,
    pub middlewares: Vec<String>,
    pub handler: String,
}

/// `"<path> <METHOD>"`, then one tab-indented line per middleware and the
/// handler.
impl fmt::Display for EndpointInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.method.is_empty() {
            writeln!(f, "{}", self.path)?;
        } else {
            writeln!(f, "{} {}", self.path, self.method)?;
        }
        for middleware in &self.middlewares {
            writeln!(f, "\t{middleware}")?;
        }
        write!(f, "\t{}", self.handler)
    }
}

impl Route {
    /// Endpoints this tree registers when mounted, in registration order.
    pub fn endpoints(&self) -> Vec<EndpointInfo> {
        let mut endpoints = Vec::new();
        self.walk(|route: &Route, path: &str, middlewares: &[Middleware]| {
            let Some(handler) = route.handler() else {
                return;
            };
            let path = format!("{path}{}", route.path());
            let pattern = Pattern::new(route.method().clone(), path.as_str());
            endpoints.push(EndpointInfo {
                pattern: pattern.to_string(),
                method: route.method().to_string(),
                path,
                middlewares: middlewares
                    .iter()
                    .chain(route.middlewares())
                    .map(|m| m.name().to_owned())
                    .collect(),
                handler: handler.name().to_owned(),
            });
        });
        endpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::handler::Handler;

    async fn get_foo() -> &'static str {
        "getFooHandler"
    }

    async fn post_bar() -> &'static str {
        "postBarHandler"
    }

    fn noop(name: &'static str) -> Middleware {
        Middleware::new(|next| next).named(name)
    }

    fn tree() -> Route {
        Route::new("/api").with([noop("general")]).add([
            Route::new("/foo")
                .with([noop("foo")])
                .add([Route::get(get_foo).with([noop("get_foo")])]),
            Route::new("/bar")
                .with([noop("bar")])
                .add([Route::post(post_bar)]),
        ])
    }

    #[test]
    fn test_endpoints_list_chain_in_execution_order() {
        let endpoints = tree().endpoints();
        assert_eq!(endpoints.len(), 2);

        assert_eq!(endpoints[0].pattern, "GET /api/foo");
        assert_eq!(endpoints[0].middlewares, vec!["general", "foo", "get_foo"]);
        assert!(endpoints[0].handler.ends_with("get_foo"));

        assert_eq!(endpoints[1].pattern, "POST /api/bar");
        assert_eq!(endpoints[1].method, "POST");
        assert_eq!(endpoints[1].path, "/api/bar");
        assert_eq!(endpoints[1].middlewares, vec!["general", "bar"]);
    }

    #[test]
    fn test_display_indents_chain() {
        let route = Route::new("/x").with([noop("mw")]).add([Route::endpoint(
            axum::http::Method::PUT,
            Some(Handler::new(get_foo).named("put_x")),
        )]);

        let rendered = route.endpoints()[0].to_string();
        assert_eq!(rendered, "/x PUT\n\tmw\n\tput_x");
    }

    #[test]
    fn test_display_wildcard_has_no_method() {
        let route = Route::new("/any").add([Route::endpoint(
            crate::routing::MethodToken::ANY,
            Some(Handler::new(get_foo).named("any")),
        )]);

        assert_eq!(route.endpoints()[0].to_string(), "/any\n\tany");
    }

    #[test]
    fn test_endpoints_serialize() {
        let json = serde_json::to_value(&tree().endpoints()[1]).unwrap();
        assert_eq!(json["pattern"], "POST /api/bar");
        assert_eq!(json["middlewares"][1], "bar");
    }
}

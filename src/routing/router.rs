//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the route table handed over at construction
//! - Resolve a request to a handler factory plus extracted components
//! - Return an explicit no-match (`None`) for every kind of failure
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) exact-match shortcut via HashMap, keyed on the target path only
//! - O(n) template scan in registration order; first match wins
//! - Templates are compiled per lookup, nothing is cached

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::http::handler::ResponseCreating;
use crate::routing::matcher::{parse_queries, raw_path, PathComponents, UrlParser};
use crate::routing::path::{Path, Verb};

/// The two request fields routing depends on.
pub trait RoutableRequest {
    /// Raw method token, e.g. `"GET"`.
    fn method(&self) -> &str;

    /// Request target: a path optionally followed by `?query`.
    fn target(&self) -> &str;
}

/// Minimal owned request, for callers that are not on top of `http`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRequest {
    pub method: String,
    pub target: String,
}

impl RawRequest {
    pub fn new(method: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            target: target.into(),
        }
    }
}

impl RoutableRequest for RawRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn target(&self) -> &str {
        &self.target
    }
}

impl<B> RoutableRequest for axum::http::Request<B> {
    fn method(&self) -> &str {
        axum::http::Request::method(self).as_str()
    }

    fn target(&self) -> &str {
        let uri = self.uri();
        uri.path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path())
    }
}

/// A successful lookup.
#[derive(Clone)]
pub struct RouteMatch {
    pub components: PathComponents,
    pub handler: Arc<dyn ResponseCreating>,
}

impl RouteMatch {
    pub fn into_parts(self) -> (PathComponents, Arc<dyn ResponseCreating>) {
        (self.components, self.handler)
    }
}

impl fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("components", &self.components)
            .finish_non_exhaustive()
    }
}

/// Immutable route table.
pub struct Router {
    routes: Vec<(Path, Arc<dyn ResponseCreating>)>,
    exact: HashMap<Path, usize>,
}

impl Router {
    /// Build the table. Registration order is kept and decides which
    /// template wins when several could match. A repeated key replaces the
    /// earlier factory in place.
    pub fn new<I>(routes: I) -> Self
    where
        I: IntoIterator<Item = (Path, Arc<dyn ResponseCreating>)>,
    {
        let mut table: Vec<(Path, Arc<dyn ResponseCreating>)> = Vec::new();
        let mut exact: HashMap<Path, usize> = HashMap::new();

        for (path, handler) in routes {
            match exact.get(&path) {
                Some(&index) => {
                    tracing::warn!(route = %path, "Duplicate route registration, replacing handler");
                    table[index].1 = handler;
                }
                None => {
                    exact.insert(path.clone(), table.len());
                    table.push((path, handler));
                }
            }
        }

        tracing::debug!(routes = table.len(), "Route table built");
        Self { routes: table, exact }
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered keys in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.routes.iter().map(|(path, _)| path)
    }

    /// Resolve `request` to a handler.
    pub fn route<R>(&self, request: &R) -> Option<RouteMatch>
    where
        R: RoutableRequest + ?Sized,
    {
        let verb = match Verb::from_method(request.method()) {
            Some(verb) => verb,
            None => {
                tracing::trace!(method = %request.method(), "Unknown method");
                return None;
            }
        };
        let target = request.target();

        // Exact-match shortcut
        let key = Path::new(raw_path(target), verb);
        if let Some(&index) = self.exact.get(&key) {
            return Some(RouteMatch {
                components: PathComponents::new(HashMap::new(), parse_queries(target)),
                handler: self.routes[index].1.clone(),
            });
        }

        for (path, handler) in &self.routes {
            if path.verb() != verb {
                continue;
            }
            let parser = match UrlParser::new(path.template()) {
                Ok(parser) => parser,
                Err(e) => {
                    tracing::warn!(route = %path, error = %e, "Skipping malformed template");
                    continue;
                }
            };
            if let Some(components) = parser.parse(target) {
                return Some(RouteMatch {
                    components,
                    handler: handler.clone(),
                });
            }
        }

        None
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.paths().collect::<Vec<_>>())
            .finish()
    }
}

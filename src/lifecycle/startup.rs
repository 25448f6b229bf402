//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn validated route configuration into the immutable route table
//!
//! # Design Decisions
//! - Fail fast: config is validated before this point
//! - Route order from the config file is registration order

use std::sync::Arc;

use axum::http::{HeaderValue, StatusCode};

use crate::config::RouteConfig;
use crate::http::handler::{ResponseCreating, StaticResponse};
use crate::routing::{Path, Router, Verb};

/// Build a [`Router`] serving the configured static routes.
///
/// Entries that do not survive validation (unknown method, bad status or
/// content type) are skipped with a warning.
pub fn router_from_config(routes: &[RouteConfig]) -> Router {
    let table = routes.iter().filter_map(|route| {
        let verb = match Verb::from_method(&route.method) {
            Some(verb) => verb,
            None => {
                tracing::warn!(method = %route.method, path = %route.path, "Skipping route with unknown method");
                return None;
            }
        };
        let status = match StatusCode::from_u16(route.status) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(status = route.status, path = %route.path, error = %e, "Skipping route with invalid status");
                return None;
            }
        };
        let content_type = match HeaderValue::from_str(&route.content_type) {
            Ok(content_type) => content_type,
            Err(e) => {
                tracing::warn!(content_type = %route.content_type, path = %route.path, error = %e, "Skipping route with invalid content type");
                return None;
            }
        };

        let handler: Arc<dyn ResponseCreating> =
            Arc::new(StaticResponse::new(status, content_type, route.body.clone()));
        tracing::info!(method = %verb, path = %route.path, status = status.as_u16(), "Route registered");
        Some((Path::new(route.path.clone(), verb), handler))
    });

    Router::new(table)
}

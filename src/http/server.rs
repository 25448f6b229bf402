//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum app with a single catch-all handler
//! - Wire up middleware (tracing, request timeout)
//! - Bind server to listener
//! - Dispatch requests to the route table and invoke the matched factory

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
};
use http_body_util::LengthLimitError;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::context::RequestContext;
use crate::lifecycle::signals::shutdown_signal;
use crate::lifecycle::startup::router_from_config;
use crate::routing::{RoutableRequest, Router};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<Router>,
    pub max_body_bytes: usize,
}

/// HTTP front end for a route table.
pub struct HttpServer {
    app: axum::Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Serve `router` with the listener and timeout settings from `config`.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        let state = AppState {
            router: Arc::new(router),
            max_body_bytes: config.listener.max_body_bytes,
        };
        let app = Self::build_app(&config, state);
        Self { app, config }
    }

    /// Serve the static routes declared in `config`.
    pub fn from_config(config: ServerConfig) -> Self {
        let router = router_from_config(&config.routes);
        Self::new(config, router)
    }

    /// Build the Axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &ServerConfig, state: AppState) -> axum::Router {
        axum::Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until Ctrl+C or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Route the request and hand it to the matched factory.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let target = RoutableRequest::target(&request).to_string();

    let (components, handler) = match state.router.route(&request) {
        Some(matched) => matched.into_parts(),
        None => {
            tracing::warn!(method = %method, target = %target, "No route matched");
            return (StatusCode::NOT_FOUND, "No matching route found").into_response();
        }
    };

    tracing::debug!(
        method = %method,
        target = %target,
        parameters = components.parameters().len(),
        "Route matched"
    );

    let body = match axum::body::to_bytes(request.into_body(), state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(method = %method, target = %target, error = %e, "Failed to buffer request body");
            return match body_error_status(e) {
                StatusCode::PAYLOAD_TOO_LARGE => {
                    (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response()
                }
                status => (status, "Failed to read request body").into_response(),
            };
        }
    };

    let context = RequestContext::from_components(&components);
    let response = handler.create_response(&context, body);

    tracing::debug!(
        method = %method,
        target = %target,
        status = response.status().as_u16(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Request handled"
    );
    response
}

/// 413 when the body limit was hit, 400 for any other read failure.
fn body_error_status(err: axum::Error) -> StatusCode {
    let inner = err.into_inner();
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(inner.as_ref());
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return StatusCode::PAYLOAD_TOO_LARGE;
        }
        source = e.source();
    }
    StatusCode::BAD_REQUEST
}

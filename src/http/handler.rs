//! Handler factories.
//!
//! # Responsibilities
//! - Define the single seam between the router and response creation
//! - Provide the static, config-driven factory used by the server binary
//!
//! # Design Decisions
//! - The router only stores `Arc<dyn ResponseCreating>` and never calls it
//! - Response creation is synchronous; the body is already buffered

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::http::context::RequestContext;

/// Buffered request body passed to a factory.
pub type RequestBody = Bytes;

/// Produces the response for a matched route.
pub trait ResponseCreating: Send + Sync {
    fn create_response(&self, context: &RequestContext, body: RequestBody) -> Response;
}

impl<F> ResponseCreating for F
where
    F: Fn(&RequestContext, RequestBody) -> Response + Send + Sync,
{
    fn create_response(&self, context: &RequestContext, body: RequestBody) -> Response {
        self(context, body)
    }
}

/// Fixed status and content type; `{name}` placeholders in the body are
/// filled from the request context.
#[derive(Debug, Clone)]
pub struct StaticResponse {
    status: StatusCode,
    content_type: HeaderValue,
    body: String,
}

impl StaticResponse {
    pub fn new(status: StatusCode, content_type: HeaderValue, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// Body with every known placeholder replaced. Unknown placeholders are
    /// left untouched.
    pub fn render(&self, context: &RequestContext) -> String {
        let mut out = String::with_capacity(self.body.len());
        let mut rest = self.body.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => {
                    let name = &after[..close];
                    // Only the innermost `{` opens a placeholder.
                    if let Some(inner) = name.rfind('{') {
                        out.push('{');
                        out.push_str(&name[..inner]);
                        rest = &after[inner..];
                        continue;
                    }
                    match context.get(name) {
                        Some(value) => out.push_str(&value.to_string()),
                        None => {
                            out.push('{');
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    rest = &after[close + 1..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl ResponseCreating for StaticResponse {
    fn create_response(&self, context: &RequestContext, _body: RequestBody) -> Response {
        let mut response = Response::new(Body::from(self.render(context)));
        *response.status_mut() = self.status;
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, self.content_type.clone());
        response
    }
}

/// Echoes the request context back as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextEcho;

impl ResponseCreating for ContextEcho {
    fn create_response(&self, context: &RequestContext, _body: RequestBody) -> Response {
        axum::Json(context.clone()).into_response()
    }
}

//! HTTP framework layer around the routing kernel.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all dispatch)
//!     → routing::Router (match method + target)
//!     → context.rs (RequestContext from path parameters and query items)
//!     → handler.rs (ResponseCreating factory builds the response)
//!     → Send to client
//! ```

pub mod context;
pub mod handler;
pub mod parser;
pub mod server;

pub use context::{ContextValue, RequestContext};
pub use handler::{ContextEcho, RequestBody, ResponseCreating, StaticResponse};
pub use parser::{JsonBodyParser, RequestParser};
pub use server::HttpServer;

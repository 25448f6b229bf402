//! Template-based HTTP request router.
//!
//! Maps a request (method + target) to a registered handler factory,
//! extracting `{name}` path parameters and query items along the way.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::{HttpServer, RequestContext, ResponseCreating};
pub use lifecycle::Shutdown;
pub use routing::{Path, PathComponents, Router, UrlParser, Verb};

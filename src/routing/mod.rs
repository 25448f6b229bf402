//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, target)
//!     → path.rs (resolve Verb; unknown method = NoMatch)
//!     → router.rs (exact lookup on target path, then template scan)
//!     → matcher.rs (compile template, match segments, parse query)
//!     → Return: (PathComponents, handler factory) or NoMatch
//!
//! Route Table (at startup):
//!     (Path, handler)[] in registration order
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Route table immutable at runtime; new routes mean a new Router
//! - No regex in hot path (segment-by-segment comparison only)
//! - Deterministic: first registered template that matches wins
//! - Exact matches win over templates

pub mod matcher;
pub mod path;
pub mod router;

pub use matcher::{PathComponents, QueryItem, TemplateError, UrlParser};
pub use path::{Path, UnknownVerb, Verb};
pub use router::{RawRequest, RoutableRequest, RouteMatch, Router};

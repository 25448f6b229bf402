//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route has a known method and a compilable template
//! - Validate value ranges (timeouts > 0, status codes valid)
//! - Detect duplicate routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;

use axum::http::{HeaderValue, StatusCode};
use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::routing::{TemplateError, UrlParser, Verb};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address must not be empty")]
    EmptyBindAddress,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("route {index}: unknown method {method:?}")]
    UnknownMethod { index: usize, method: String },

    #[error("route {index}: {source}")]
    InvalidTemplate { index: usize, source: TemplateError },

    #[error("route {index}: invalid status code {status}")]
    InvalidStatus { index: usize, status: u16 },

    #[error("route {index}: invalid content type {content_type:?}")]
    InvalidContentType { index: usize, content_type: String },

    #[error("route {index}: duplicate of an earlier {method} {path} route")]
    DuplicateRoute {
        index: usize,
        method: String,
        path: String,
    },
}

/// Check `config` for semantic errors, collecting all of them.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let mut seen = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if Verb::from_method(&route.method).is_none() {
            errors.push(ValidationError::UnknownMethod {
                index,
                method: route.method.clone(),
            });
        }
        if let Err(source) = UrlParser::new(&route.path) {
            errors.push(ValidationError::InvalidTemplate { index, source });
        }
        if StatusCode::from_u16(route.status).is_err() {
            errors.push(ValidationError::InvalidStatus {
                index,
                status: route.status,
            });
        }
        if HeaderValue::from_str(&route.content_type).is_err() {
            errors.push(ValidationError::InvalidContentType {
                index,
                content_type: route.content_type.clone(),
            });
        }
        if !seen.insert((route.method.as_str(), route.path.as_str())) {
            errors.push(ValidationError::DuplicateRoute {
                index,
                method: route.method.clone(),
                path: route.path.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Typed request decoding.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

/// Builds a typed value out of the raw parts of a request.
pub trait RequestParser<T> {
    fn parse_request(&self, path: &str, query: Option<&str>, body: Option<&[u8]>) -> Option<T>;
}

/// Decodes the request body as JSON into `T`.
#[derive(Debug)]
pub struct JsonBodyParser<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonBodyParser<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonBodyParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonBodyParser<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> RequestParser<T> for JsonBodyParser<T> {
    fn parse_request(&self, path: &str, _query: Option<&str>, body: Option<&[u8]>) -> Option<T> {
        let body = body.filter(|b| !b.is_empty())?;
        match serde_json::from_slice(body) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(path = %path, error = %e, "Request body is not valid JSON for target type");
                None
            }
        }
    }
}

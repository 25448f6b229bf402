//! Per-request context handed to handler factories.
//!
//! # Design Decisions
//! - Immutable: `adding` returns a new context and leaves the receiver alone
//! - Values are a closed set of kinds rather than an open dynamic type
//! - Built from a match as query items (first occurrence) overlaid by path
//!   parameters, so a path parameter shadows a query item of the same name

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::routing::matcher::PathComponents;

/// A value stored in a [`RequestContext`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl ContextValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ContextValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ContextValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ContextValue::Float(f) => Some(*f),
            ContextValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ContextValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextValue::String(s) => f.write_str(s),
            ContextValue::Integer(i) => write!(f, "{}", i),
            ContextValue::Float(x) => write!(f, "{}", x),
            ContextValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        ContextValue::String(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        ContextValue::String(value.to_string())
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        ContextValue::Integer(value)
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        ContextValue::Float(value)
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        ContextValue::Bool(value)
    }
}

/// Immutable key/value snapshot for one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RequestContext {
    storage: HashMap<String, ContextValue>,
}

impl RequestContext {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ContextValue>,
    {
        Self {
            storage: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Context for a routed request.
    pub fn from_components(components: &PathComponents) -> Self {
        let mut storage = HashMap::new();
        for item in components.queries().unwrap_or_default() {
            storage
                .entry(item.name.clone())
                .or_insert_with(|| ContextValue::String(item.value.clone()));
        }
        for (name, value) in components.parameters() {
            storage.insert(name.clone(), ContextValue::String(value.clone()));
        }
        Self { storage }
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.storage.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.storage.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.storage.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// A new context with `extra` layered on top. On a key collision the
    /// entry from `extra` wins.
    pub fn adding<I, K, V>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ContextValue>,
    {
        let mut storage = self.storage.clone();
        storage.extend(extra.into_iter().map(|(k, v)| (k.into(), v.into())));
        Self { storage }
    }
}

//! Route table keys.
//!
//! # Design Decisions
//! - Verb is a closed set; unknown methods never produce a value
//! - Method tokens are matched exactly (no case folding)
//! - Path equality is structural: same template text and same verb

use std::fmt;
use std::str::FromStr;

/// HTTP method accepted by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
}

impl Verb {
    /// Resolve a raw method token. Returns `None` for anything outside the set.
    pub fn from_method(raw: &str) -> Option<Self> {
        let verb = match raw {
            "GET" => Verb::Get,
            "HEAD" => Verb::Head,
            "POST" => Verb::Post,
            "PUT" => Verb::Put,
            "DELETE" => Verb::Delete,
            "CONNECT" => Verb::Connect,
            "OPTIONS" => Verb::Options,
            "TRACE" => Verb::Trace,
            "PATCH" => Verb::Patch,
            _ => return None,
        };
        Some(verb)
    }

    /// Canonical method token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Head => "HEAD",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
            Verb::Connect => "CONNECT",
            Verb::Options => "OPTIONS",
            Verb::Trace => "TRACE",
            Verb::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Verb`] from an unknown method token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown HTTP method: {0}")]
pub struct UnknownVerb(pub String);

impl FromStr for Verb {
    type Err = UnknownVerb;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::from_method(s).ok_or_else(|| UnknownVerb(s.to_string()))
    }
}

/// Route table key: a path template paired with a verb.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    template: String,
    verb: Verb,
}

impl Path {
    pub fn new(template: impl Into<String>, verb: Verb) -> Self {
        Self {
            template: template.into(),
            verb,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.template)
    }
}

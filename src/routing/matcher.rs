//! Template matching logic.
//!
//! # Responsibilities
//! - Compile a path template into literal and parameter segments
//! - Match a concrete request target against the compiled template
//! - Extract named parameters and ordered query items
//!
//! # Design Decisions
//! - A segment is a parameter iff it is wrapped in `{` `}`; no escaping,
//!   no nesting, no type constraints
//! - Segment counts must be equal; there are no catch-all segments
//! - Literal comparison is case-sensitive and runs on percent-decoded
//!   target segments, so templates are written in decoded form
//! - Every failure collapses to `None` at the public boundary; the richer
//!   outcome is only traced

use std::collections::HashMap;
use std::sync::OnceLock;

use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::Url;

/// Errors raised while compiling a path template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `{}` segment has no name between its delimiters.
    #[error("empty parameter name at segment {position} of template {template:?}")]
    EmptyParameterName { template: String, position: usize },

    /// The same parameter name appears in more than one segment.
    #[error("parameter {name:?} appears more than once in template {template:?}")]
    DuplicateParameter { template: String, name: String },
}

/// A single `name=value` pair from the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryItem {
    pub name: String,
    pub value: String,
}

impl QueryItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Data extracted from a successful match.
///
/// `queries` is `None` when the target had no query component at all and
/// `Some(vec![])` when a `?` was present but carried no items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathComponents {
    parameters: HashMap<String, String>,
    queries: Option<Vec<QueryItem>>,
}

impl PathComponents {
    pub fn new(parameters: HashMap<String, String>, queries: Option<Vec<QueryItem>>) -> Self {
        Self { parameters, queries }
    }

    /// Captured path parameters by name.
    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    /// Value captured for a single parameter.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Query items in target order, duplicates preserved.
    pub fn queries(&self) -> Option<&[QueryItem]> {
        self.queries.as_deref()
    }

    pub fn into_parts(self) -> (HashMap<String, String>, Option<Vec<QueryItem>>) {
        (self.parameters, self.queries)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Parameter(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw.len() >= 2 && raw.starts_with('{') && raw.ends_with('}') {
            Segment::Parameter(raw[1..raw.len() - 1].to_string())
        } else {
            Segment::Literal(raw.to_string())
        }
    }
}

/// Why a candidate did or did not match. Never leaves this module.
#[derive(Debug)]
enum MatchOutcome {
    Matched(PathComponents),
    InvalidUrl,
    SegmentCount { expected: usize, actual: usize },
    LiteralMismatch { position: usize },
}

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct UrlParser {
    template: String,
    segments: Vec<Segment>,
}

impl UrlParser {
    /// Compile `template`, splitting it on `/` and discarding the empty
    /// segment produced by a leading slash.
    pub fn new(template: &str) -> Result<Self, TemplateError> {
        let mut raw: Vec<&str> = template.split('/').collect();
        if raw.first() == Some(&"") {
            raw.remove(0);
        }

        let mut seen: Vec<&str> = Vec::new();
        let mut segments = Vec::with_capacity(raw.len());
        for (position, part) in raw.into_iter().enumerate() {
            let segment = Segment::parse(part);
            if let Segment::Parameter(name) = &segment {
                if name.is_empty() {
                    return Err(TemplateError::EmptyParameterName {
                        template: template.to_string(),
                        position,
                    });
                }
                let name_str = &part[1..part.len() - 1];
                if seen.contains(&name_str) {
                    return Err(TemplateError::DuplicateParameter {
                        template: template.to_string(),
                        name: name.clone(),
                    });
                }
                seen.push(name_str);
            }
            segments.push(segment);
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Number of segments a target must have to match.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Parameter names in template order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Parameter(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match `candidate` against this template.
    pub fn parse(&self, candidate: &str) -> Option<PathComponents> {
        match self.evaluate(candidate) {
            MatchOutcome::Matched(components) => Some(components),
            MatchOutcome::InvalidUrl => {
                tracing::trace!(template = %self.template, candidate = %candidate, "Target is not a valid URL");
                None
            }
            MatchOutcome::SegmentCount { expected, actual } => {
                tracing::trace!(
                    template = %self.template,
                    candidate = %candidate,
                    expected,
                    actual,
                    "Segment count differs"
                );
                None
            }
            MatchOutcome::LiteralMismatch { position } => {
                tracing::trace!(
                    template = %self.template,
                    candidate = %candidate,
                    position,
                    "Literal segment differs"
                );
                None
            }
        }
    }

    fn evaluate(&self, candidate: &str) -> MatchOutcome {
        let url = match parse_target(candidate) {
            Some(url) => url,
            None => return MatchOutcome::InvalidUrl,
        };

        let segments = path_segments(candidate);
        if segments.len() != self.segments.len() {
            return MatchOutcome::SegmentCount {
                expected: self.segments.len(),
                actual: segments.len(),
            };
        }

        let mut parameters = HashMap::new();
        for (position, (expected, actual)) in self.segments.iter().zip(segments).enumerate() {
            match expected {
                Segment::Parameter(name) => {
                    parameters.insert(name.clone(), actual);
                }
                Segment::Literal(literal) => {
                    if *literal != actual {
                        return MatchOutcome::LiteralMismatch { position };
                    }
                }
            }
        }

        MatchOutcome::Matched(PathComponents::new(parameters, query_items(&url)))
    }
}

fn base_url() -> &'static Url {
    static BASE: OnceLock<Url> = OnceLock::new();
    BASE.get_or_init(|| Url::parse("http://localhost/").expect("static base URL is valid"))
}

/// Parse a request target, resolving origin-form targets against a fixed base.
fn parse_target(candidate: &str) -> Option<Url> {
    base_url().join(candidate).ok()
}

/// Decoded path segments of the raw target, without the empty segment of
/// the leading slash. Dot segments and backslashes are kept as written.
pub(crate) fn path_segments(target: &str) -> Vec<String> {
    let mut raw: Vec<&str> = raw_path(target).split('/').collect();
    if raw.first() == Some(&"") {
        raw.remove(0);
    }
    raw.into_iter()
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .collect()
}

fn query_items(url: &Url) -> Option<Vec<QueryItem>> {
    url.query()?;
    Some(
        url.query_pairs()
            .map(|(name, value)| QueryItem::new(name, value))
            .collect(),
    )
}

/// Query items of a raw target, or `None` when it has no query component
/// or is not a valid URL.
pub(crate) fn parse_queries(target: &str) -> Option<Vec<QueryItem>> {
    parse_target(target).and_then(|url| query_items(&url))
}

/// The path portion of a raw target, without query or fragment.
pub(crate) fn target_path(target: &str) -> &str {
    target
        .find(|c: char| c == '?' || c == '#')
        .map_or(target, |end| &target[..end])
}

/// The raw path of an origin-form or absolute-form target.
pub(crate) fn raw_path(target: &str) -> &str {
    let path = target_path(target);
    match path.find("://") {
        Some(scheme_end) if !path.starts_with('/') => {
            let after_scheme = &path[scheme_end + 3..];
            after_scheme
                .find('/')
                .map_or("/", |start| &after_scheme[start..])
        }
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(pairs: &[(&str, &str)]) -> Vec<QueryItem> {
        pairs.iter().map(|(n, v)| QueryItem::new(*n, *v)).collect()
    }

    #[test]
    fn test_extracts_parameters() {
        let parser = UrlParser::new("/users/{id}/posts/{post}").unwrap();
        let components = parser.parse("/users/42/posts/7").unwrap();

        assert_eq!(components.parameters().len(), 2);
        assert_eq!(components.parameter("id"), Some("42"));
        assert_eq!(components.parameter("post"), Some("7"));
        assert_eq!(components.queries(), None);
    }

    #[test]
    fn test_literal_only_template_has_no_parameters() {
        let parser = UrlParser::new("/health").unwrap();
        let components = parser.parse("/health").unwrap();
        assert!(components.parameters().is_empty());
    }

    #[test]
    fn test_segment_count_mismatch() {
        let parser = UrlParser::new("/a/{id}").unwrap();
        assert!(parser.parse("/a/b/c").is_none());
        assert!(parser.parse("/a").is_none());
        assert_eq!(parser.segment_count(), 2);
    }

    #[test]
    fn test_literal_mismatch() {
        let parser = UrlParser::new("/users/{id}").unwrap();
        assert!(parser.parse("/admins/5").is_none());
        // Case-sensitive
        assert!(parser.parse("/Users/5").is_none());
    }

    #[test]
    fn test_empty_segment_is_a_legal_capture() {
        let parser = UrlParser::new("/users/{id}/").unwrap();
        let components = parser.parse("/users//").unwrap();
        assert_eq!(components.parameter("id"), Some(""));
    }

    #[test]
    fn test_trailing_slash_is_significant() {
        let parser = UrlParser::new("/users/{id}").unwrap();
        assert!(parser.parse("/users/1/").is_none());
    }

    #[test]
    fn test_query_absent() {
        let parser = UrlParser::new("/x").unwrap();
        assert_eq!(parser.parse("/x").unwrap().queries(), None);
    }

    #[test]
    fn test_query_present_but_empty() {
        let parser = UrlParser::new("/x").unwrap();
        assert_eq!(parser.parse("/x?").unwrap().queries(), Some(&[][..]));
    }

    #[test]
    fn test_query_order_and_duplicates_preserved() {
        let parser = UrlParser::new("/x").unwrap();
        let components = parser.parse("/x?a=1&a=2").unwrap();
        assert_eq!(
            components.queries(),
            Some(items(&[("a", "1"), ("a", "2")]).as_slice())
        );

        let components = parser.parse("/x?b=2&a=1&flag").unwrap();
        assert_eq!(
            components.queries(),
            Some(items(&[("b", "2"), ("a", "1"), ("flag", "")]).as_slice())
        );
    }

    #[test]
    fn test_query_values_are_decoded() {
        let parser = UrlParser::new("/search").unwrap();
        let components = parser.parse("/search?q=hello+world&tag=a%26b").unwrap();
        assert_eq!(
            components.queries(),
            Some(items(&[("q", "hello world"), ("tag", "a&b")]).as_slice())
        );
    }

    #[test]
    fn test_segments_compared_after_decoding() {
        let parser = UrlParser::new("/files/my docs/{name}").unwrap();
        let components = parser.parse("/files/my%20docs/r%C3%A9sum%C3%A9").unwrap();
        assert_eq!(components.parameter("name"), Some("résumé"));
    }

    #[test]
    fn test_absolute_target() {
        let parser = UrlParser::new("/users/{id}").unwrap();
        let components = parser.parse("http://example.com/users/9?x=1").unwrap();
        assert_eq!(components.parameter("id"), Some("9"));
        assert_eq!(components.queries(), Some(items(&[("x", "1")]).as_slice()));
    }

    #[test]
    fn test_invalid_url_is_no_match() {
        let parser = UrlParser::new("/x").unwrap();
        assert!(parser.parse("http://[bad/x").is_none());
    }

    #[test]
    fn test_fragment_is_not_part_of_path() {
        let parser = UrlParser::new("/doc/{page}").unwrap();
        let components = parser.parse("/doc/intro#top").unwrap();
        assert_eq!(components.parameter("page"), Some("intro"));
        assert_eq!(components.queries(), None);
    }

    #[test]
    fn test_root_template() {
        let parser = UrlParser::new("/").unwrap();
        assert!(parser.parse("/").is_some());
        assert!(parser.parse("/a").is_none());
    }

    #[test]
    fn test_template_without_leading_slash() {
        let parser = UrlParser::new("users/{id}").unwrap();
        assert_eq!(parser.parse("/users/3").unwrap().parameter("id"), Some("3"));
    }

    #[test]
    fn test_parameter_names_in_order() {
        let parser = UrlParser::new("/{org}/repos/{repo}").unwrap();
        let names: Vec<&str> = parser.parameter_names().collect();
        assert_eq!(names, vec!["org", "repo"]);
    }

    #[test]
    fn test_brace_fragments_are_literals() {
        let parser = UrlParser::new("/a{b}c/{").unwrap();
        assert_eq!(parser.parameter_names().count(), 0);
        assert!(parser.parse("/a%7Bb%7Dc/%7B").is_some());
    }

    #[test]
    fn test_empty_parameter_name_rejected() {
        let err = UrlParser::new("/users/{}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::EmptyParameterName {
                template: "/users/{}".into(),
                position: 1,
            }
        );
    }

    #[test]
    fn test_duplicate_parameter_rejected() {
        let err = UrlParser::new("/{id}/x/{id}").unwrap_err();
        assert!(matches!(err, TemplateError::DuplicateParameter { ref name, .. } if name == "id"));
    }

    #[test]
    fn test_target_helpers() {
        assert_eq!(target_path("/a/b?c=1"), "/a/b");
        assert_eq!(target_path("/a#frag"), "/a");
        assert_eq!(target_path("/a"), "/a");
        assert_eq!(raw_path("http://example.com/a/b?c"), "/a/b");
        assert_eq!(raw_path("http://example.com"), "/");
        assert_eq!(raw_path("/a/b"), "/a/b");
        assert_eq!(parse_queries("/a"), None);
        assert_eq!(parse_queries("/a?"), Some(vec![]));
        assert_eq!(parse_queries("/a?k=v"), Some(items(&[("k", "v")])));
    }

    #[test]
    fn test_dot_segments_are_not_resolved() {
        let parser = UrlParser::new("/a/{id}").unwrap();
        assert!(parser.parse("/a/b/..").is_none());
        assert!(parser.parse("/a/./b").is_none());

        let parser = UrlParser::new("/users/{id}").unwrap();
        assert!(parser.parse("/users/x/../me").is_none());
        assert!(parser.parse("/users/./me").is_none());

        let parser = UrlParser::new("/a/{x}/{y}").unwrap();
        let components = parser.parse("/a/./..").unwrap();
        assert_eq!(components.parameter("x"), Some("."));
        assert_eq!(components.parameter("y"), Some(".."));
    }

    #[test]
    fn test_backslash_is_not_a_separator() {
        let parser = UrlParser::new("/users/{id}").unwrap();
        assert!(parser.parse("/users\\me").is_none());

        let parser = UrlParser::new("/{name}").unwrap();
        assert_eq!(parser.parse("/users\\me").unwrap().parameter("name"), Some("users\\me"));
    }

    #[test]
    fn test_outcome_reports_why() {
        let parser = UrlParser::new("/a/{id}").unwrap();
        assert!(matches!(
            parser.evaluate("/a/b/c"),
            MatchOutcome::SegmentCount { expected: 2, actual: 3 }
        ));
        assert!(matches!(
            parser.evaluate("/b/c"),
            MatchOutcome::LiteralMismatch { position: 0 }
        ));
        assert!(matches!(parser.evaluate("http://[bad/a/1"), MatchOutcome::InvalidUrl));
        assert!(matches!(parser.evaluate("/a/1"), MatchOutcome::Matched(_)));
    }
}

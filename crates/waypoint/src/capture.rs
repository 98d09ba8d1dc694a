//! Route pattern compilation and matching.

use regex::Regex;
use tracing::warn;

use crate::error::{Result, RouterError};
use crate::request::Params;

/// Regex fragment for a dynamic segment: one or more non-separator characters.
const DYNAMIC_SEGMENT: &str = "([^/]+)";

/// A segment in a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A literal segment, matched exactly.
    Literal(String),
    /// A dynamic segment (e.g. `:id`), bound to a named parameter.
    Dynamic(String),
}

/// A compiled route pattern.
///
/// Built once per declared route and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Capture {
    /// The original pattern string.
    pattern: String,
    /// Segments between `/` separators, in order.
    segments: Vec<Segment>,
    /// Matcher anchored at both ends of the path.
    regex: Regex,
    /// Dynamic segment names in pattern order.
    param_names: Vec<String>,
}

impl Capture {
    /// Compiles a route pattern.
    ///
    /// Pattern syntax:
    /// - `/users/` - literal segments
    /// - `/:id/edit/` - `:id` matches one or more non-`/` characters
    ///
    /// The matcher is case-sensitive and must cover the entire path.
    /// Literal segments match exactly, including regex metacharacters and
    /// doubled or trailing slashes.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] if the pattern is empty, has
    /// a `:` segment without a name, or declares the same name twice.
    ///
    /// # Example
    ///
    /// ```
    /// use waypoint::Capture;
    ///
    /// let capture = Capture::build("/posts/:id/comments/:comment_id/").unwrap();
    /// let params = capture.match_path("/posts/123/comments/456/").unwrap();
    /// assert_eq!(params.get("id"), Some("123"));
    /// assert_eq!(params.get("comment_id"), Some("456"));
    /// ```
    pub fn build(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(RouterError::invalid_pattern(pattern, "pattern is empty"));
        }
        if !pattern.starts_with('/') {
            warn!(pattern, "pattern does not start with '/' and will never match");
        }

        let mut segments = Vec::new();
        let mut param_names: Vec<String> = Vec::new();
        let mut fragments = Vec::new();

        for part in pattern.split('/') {
            if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(RouterError::invalid_pattern(
                        pattern,
                        "dynamic segment has no name",
                    ));
                }
                if param_names.iter().any(|n| n == name) {
                    return Err(RouterError::invalid_pattern(
                        pattern,
                        format!("duplicate dynamic segment ':{name}'"),
                    ));
                }
                param_names.push(name.to_string());
                segments.push(Segment::Dynamic(name.to_string()));
                fragments.push(DYNAMIC_SEGMENT.to_string());
            } else {
                segments.push(Segment::Literal(part.to_string()));
                fragments.push(regex::escape(part));
            }
        }

        let source = format!("^{}$", fragments.join("/"));
        let regex =
            Regex::new(&source).map_err(|e| RouterError::invalid_pattern(pattern, e.to_string()))?;

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
            regex,
            param_names,
        })
    }

    /// Attempts to match a path against this pattern.
    ///
    /// Returns the dynamic segment values, in pattern order, if the whole
    /// path matches.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<Params> {
        let caps = self.regex.captures(path)?;

        let mut params = Params::new();
        for (i, name) in self.param_names.iter().enumerate() {
            if let Some(value) = caps.get(i + 1) {
                params.insert(name.clone(), value.as_str());
            }
        }

        Some(params)
    }

    /// Returns the original pattern string.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the compiled matcher source.
    #[must_use]
    pub fn matcher(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns the parsed segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the dynamic segment names in pattern order.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Generates a path from parameters.
    ///
    /// Returns `None` if a dynamic segment has no value, or its value is
    /// empty or contains `/` (the result would not match this pattern).
    ///
    /// # Example
    ///
    /// ```
    /// use waypoint::{Capture, Params};
    ///
    /// let capture = Capture::build("/posts/:id/").unwrap();
    /// let params: Params = [("id", "123")].into_iter().collect();
    /// assert_eq!(capture.reverse(&params), Some("/posts/123/".to_string()));
    /// ```
    #[must_use]
    pub fn reverse(&self, params: &Params) -> Option<String> {
        let parts = self
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(s) => Some(s.as_str()),
                Segment::Dynamic(name) => params
                    .get(name)
                    .filter(|v| !v.is_empty() && !v.contains('/')),
            })
            .collect::<Option<Vec<_>>>()?;

        Some(parts.join("/"))
    }
}

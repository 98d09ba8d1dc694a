//! Main router implementation.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::capture::Capture;
use crate::error::{Result, RouterError};
use crate::query::parse_query_string;
use crate::request::{Params, Request};
use crate::route::{ResolvedRoute, Route, RouteDescriptor};

/// A declared route paired with its compiled pattern.
#[derive(Debug, Clone)]
struct RouteEntry<A> {
    route: Route<A>,
    capture: Capture,
}

/// Resolves paths against an ordered set of declared routes.
///
/// A router starts uninitialised; [`Router::init`] installs the route set
/// and may be called again to replace it. Routes are tried in declaration
/// order and the first match wins.
#[derive(Debug, Clone)]
pub struct Router<A> {
    /// Declared routes in order, `None` until initialised.
    entries: Option<Vec<RouteEntry<A>>>,
}

impl<A> Default for Router<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Router<A> {
    /// Creates a new uninitialised router.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: None }
    }

    /// Installs a set of routes, replacing any previous set.
    ///
    /// Every pattern is compiled up front. If any declaration is rejected
    /// the router keeps its previous state.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidRoutes`] if no routes are given, or
    /// [`RouterError::InvalidPattern`] if a pattern cannot be compiled.
    pub fn init<I>(&mut self, routes: I) -> Result<()>
    where
        I: IntoIterator<Item = RouteDescriptor<A>>,
    {
        let entries = routes
            .into_iter()
            .map(|descriptor| {
                let capture = Capture::build(&descriptor.pattern)?;
                Ok(RouteEntry {
                    route: Route::from(descriptor),
                    capture,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if entries.is_empty() {
            return Err(RouterError::InvalidRoutes(
                "at least one route is required".to_string(),
            ));
        }

        debug!(routes = entries.len(), "router initialised");
        self.entries = Some(entries);
        Ok(())
    }

    /// Returns true once [`Router::init`] has succeeded.
    #[must_use]
    pub const fn is_initialised(&self) -> bool {
        self.entries.is_some()
    }

    /// Iterates the declared routes in declaration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<A>> {
        self.entries.iter().flatten().map(|entry| &entry.route)
    }

    /// Iterates the compiled patterns in declaration order.
    pub fn captures(&self) -> impl Iterator<Item = &Capture> {
        self.entries.iter().flatten().map(|entry| &entry.capture)
    }

    /// Finds the first declared route matching `path`.
    ///
    /// The path is sanitized first (see [`sanitize_path`]); the sanitized
    /// form is what gets matched and stored on the returned request.
    /// `query_string` is kept verbatim and decoded into `request.query`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NotInitialised`] before a successful `init`,
    /// or [`RouterError::NotFound`] if no route matches.
    ///
    /// # Example
    ///
    /// ```
    /// use waypoint::{RouteDescriptor, Router};
    ///
    /// let mut router = Router::new();
    /// router
    ///     .init([RouteDescriptor::new("/:id/").action("show")])
    ///     .unwrap();
    ///
    /// let route = router.find_matching_route(" /foo", Some("?bar=baz")).unwrap();
    /// assert_eq!(route.action, Some(&"show"));
    /// assert_eq!(route.request.path, "/foo/");
    /// assert_eq!(route.request.params.get("id"), Some("foo"));
    /// assert_eq!(route.request.query.get("bar"), Some("baz"));
    /// ```
    pub fn find_matching_route(
        &self,
        path: &str,
        query_string: Option<&str>,
    ) -> Result<ResolvedRoute<'_, A>> {
        let entries = self.entries.as_ref().ok_or(RouterError::NotInitialised)?;
        let path = sanitize_path(path);

        for entry in entries {
            trace!(pattern = %entry.capture.pattern(), path = %path, "trying route");
            if let Some(params) = entry.capture.match_path(&path) {
                debug!(pattern = %entry.route.pattern, path = %path, "route matched");

                let query_string = query_string.unwrap_or_default().to_string();
                let query = parse_query_string(&query_string);
                return Ok(entry.route.resolve(Request {
                    path,
                    params,
                    query_string,
                    query,
                }));
            }
        }

        Err(RouterError::NotFound { path })
    }

    /// Like [`Router::find_matching_route`], for loosely typed input.
    ///
    /// A `null` query is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPath`] if `path` is not a string or
    /// `query_string` is neither a string nor `null`, and otherwise the
    /// errors of [`Router::find_matching_route`].
    pub fn find_matching_route_value(
        &self,
        path: &Value,
        query_string: Option<&Value>,
    ) -> Result<ResolvedRoute<'_, A>> {
        if !self.is_initialised() {
            return Err(RouterError::NotInitialised);
        }

        let Value::String(path) = path else {
            return Err(RouterError::InvalidPath(format!(
                "expected a string, got {}",
                kind(path)
            )));
        };

        let query_string = match query_string {
            None | Some(Value::Null) => None,
            Some(Value::String(qs)) => Some(qs.as_str()),
            Some(other) => {
                return Err(RouterError::InvalidPath(format!(
                    "expected a string query, got {}",
                    kind(other)
                )))
            }
        };

        self.find_matching_route(path, query_string)
    }

    /// Builds a concrete path for the route declared with `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::NotInitialised`] before a successful `init`,
    /// [`RouterError::NotFound`] if no route has that pattern, or
    /// [`RouterError::InvalidPath`] if `params` cannot fill every dynamic
    /// segment.
    pub fn path_for(&self, pattern: &str, params: &Params) -> Result<String> {
        let entries = self.entries.as_ref().ok_or(RouterError::NotInitialised)?;
        let capture = entries
            .iter()
            .map(|entry| &entry.capture)
            .find(|capture| capture.pattern() == pattern)
            .ok_or_else(|| RouterError::NotFound {
                path: pattern.to_string(),
            })?;

        capture.reverse(params).ok_or_else(|| {
            RouterError::InvalidPath(format!(
                "missing or invalid parameters for '{pattern}' (expected {})",
                capture.param_names().join(", ")
            ))
        })
    }
}

impl<A: DeserializeOwned> Router<A> {
    /// Installs routes from a JSON array of `{ "pattern", "action"? }`.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidRoutes`] if `routes` is `null`, not an
    /// array, empty, or holds an element that is not a route declaration,
    /// and otherwise the errors of [`Router::init`].
    pub fn init_from_value(&mut self, routes: &Value) -> Result<()> {
        let Value::Array(items) = routes else {
            return Err(RouterError::InvalidRoutes(format!(
                "expected an array, got {}",
                kind(routes)
            )));
        };

        let descriptors = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                RouteDescriptor::deserialize(item)
                    .map_err(|e| RouterError::InvalidRoutes(format!("route {i}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        self.init(descriptors)
    }
}

/// Normalizes a path for matching.
///
/// Surrounding whitespace is trimmed and a missing leading or trailing `/`
/// is inserted. Doubled slashes are left alone.
///
/// ```
/// use waypoint::sanitize_path;
///
/// assert_eq!(sanitize_path(" /required-segment "), "/required-segment/");
/// assert_eq!(sanitize_path(""), "/");
/// ```
#[must_use]
pub fn sanitize_path(path: &str) -> String {
    let trimmed = path.trim();
    let mut sanitized = String::with_capacity(trimmed.len() + 2);

    if !trimmed.starts_with('/') {
        sanitized.push('/');
    }
    sanitized.push_str(trimmed);
    if !sanitized.ends_with('/') {
        sanitized.push('/');
    }

    sanitized
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(patterns: &[&str]) -> Router<usize> {
        let mut router = Router::new();
        router
            .init(
                patterns
                    .iter()
                    .enumerate()
                    .map(|(i, p)| RouteDescriptor::new(*p).action(i)),
            )
            .unwrap();
        router
    }

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path("/"), "/");
        assert_eq!(sanitize_path(""), "/");
        assert_eq!(sanitize_path("   "), "/");
        assert_eq!(sanitize_path("foo"), "/foo/");
        assert_eq!(sanitize_path("/foo"), "/foo/");
        assert_eq!(sanitize_path("foo/"), "/foo/");
        assert_eq!(sanitize_path("\t/foo/\n"), "/foo/");
        assert_eq!(sanitize_path("//foo//"), "//foo//");
    }

    #[test]
    fn test_uninitialised() {
        let router: Router<()> = Router::new();
        assert!(!router.is_initialised());
        assert_eq!(
            router.find_matching_route("/", None).unwrap_err(),
            RouterError::NotInitialised
        );
        assert_eq!(
            router.path_for("/", &Params::new()).unwrap_err(),
            RouterError::NotInitialised
        );
    }

    #[test]
    fn test_init_rejects_empty() {
        let mut router: Router<()> = Router::new();
        let err = router.init(Vec::new()).unwrap_err();
        assert!(matches!(err, RouterError::InvalidRoutes(_)));
        assert!(!router.is_initialised());
    }

    #[test]
    fn test_failed_init_keeps_previous_routes() {
        let mut router = build(&["/a/"]);
        let err = router
            .init([RouteDescriptor::new("/b/"), RouteDescriptor::new("")])
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidPattern { .. }));
        assert!(router.find_matching_route("/a/", None).is_ok());
    }

    #[test]
    fn test_reinit_replaces_routes() {
        let mut router = build(&["/a/"]);
        router.init([RouteDescriptor::new("/b/").action(9)]).unwrap();

        assert_eq!(router.routes().count(), 1);
        assert!(matches!(
            router.find_matching_route("/a/", None),
            Err(RouterError::NotFound { .. })
        ));
        assert_eq!(
            router.find_matching_route("/b/", None).unwrap().action,
            Some(&9)
        );
    }

    #[test]
    fn test_routes_and_captures_in_order() {
        let router = build(&["/", "/:id/", "/about/"]);
        let patterns: Vec<_> = router.routes().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["/", "/:id/", "/about/"]);

        let matchers: Vec<_> = router.captures().map(Capture::matcher).collect();
        assert_eq!(matchers[0], "^/$");
        assert_eq!(matchers.len(), 3);
    }

    #[test]
    fn test_first_declared_wins() {
        let router = build(&["/foo/", "/:x/"]);
        let route = router.find_matching_route("/foo/", None).unwrap();
        assert_eq!(route.pattern, "/foo/");
        assert_eq!(route.action, Some(&0));

        let router = build(&["/:x/", "/foo/"]);
        let route = router.find_matching_route("/foo/", None).unwrap();
        assert_eq!(route.pattern, "/:x/");
    }

    #[test]
    fn test_query_absent() {
        let router = build(&["/"]);
        let route = router.find_matching_route("/", None).unwrap();
        assert_eq!(route.request.query_string, "");
        assert!(route.request.query.is_empty());
        assert!(route.request.params.is_empty());
    }

    #[test]
    fn test_query_parsed() {
        let router = build(&["/:id/"]);
        let route = router
            .find_matching_route("/foo/", Some("?bar=baz&n=1&n=2"))
            .unwrap();
        assert_eq!(route.request.query_string, "?bar=baz&n=1&n=2");
        assert_eq!(route.request.get_query("bar"), Some("baz"));
        assert_eq!(route.request.get_query("n"), Some("2"));
    }

    #[test]
    fn test_not_found_reports_sanitized_path() {
        let router = build(&["/"]);
        assert_eq!(
            router.find_matching_route(" missing", None).unwrap_err(),
            RouterError::NotFound {
                path: "/missing/".into()
            }
        );
    }

    #[test]
    fn test_value_boundary() {
        let router = build(&["/:id/"]);

        let err = router
            .find_matching_route_value(&Value::Null, None)
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidPath(_)));

        let err = router
            .find_matching_route_value(&json!(42), None)
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidPath(_)));

        let err = router
            .find_matching_route_value(&json!("/foo/"), Some(&json!(["x"])))
            .unwrap_err();
        assert!(matches!(err, RouterError::InvalidPath(_)));

        let route = router
            .find_matching_route_value(&json!("/foo/"), Some(&Value::Null))
            .unwrap();
        assert_eq!(route.request.param("id"), Some("foo"));
    }

    #[test]
    fn test_value_boundary_uninitialised_first() {
        let router: Router<()> = Router::new();
        assert_eq!(
            router
                .find_matching_route_value(&Value::Null, None)
                .unwrap_err(),
            RouterError::NotInitialised
        );
    }

    #[test]
    fn test_init_from_value() {
        let mut router: Router<String> = Router::new();
        router
            .init_from_value(&json!([
                {"pattern": "/", "action": "home"},
                {"pattern": "/:id/"}
            ]))
            .unwrap();

        let route = router.find_matching_route("/", None).unwrap();
        assert_eq!(route.action.map(String::as_str), Some("home"));
        let route = router.find_matching_route("/x/", None).unwrap();
        assert!(route.action.is_none());
    }

    /// An action type with no `Default` impl.
    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct View {
        name: String,
    }

    #[test]
    fn test_init_from_value_action_without_default() {
        let mut router: Router<View> = Router::new();
        router
            .init_from_value(&json!([
                {"pattern": "/", "action": {"name": "home"}},
                {"pattern": "/:id/"}
            ]))
            .unwrap();

        let route = router.find_matching_route("/", None).unwrap();
        assert_eq!(route.action.map(|v| v.name.as_str()), Some("home"));
        let route = router.find_matching_route("/x/", None).unwrap();
        assert!(route.action.is_none());
    }

    #[test]
    fn test_init_from_value_rejects_bad_input() {
        let mut router: Router<Value> = Router::new();
        for bad in [
            Value::Null,
            json!({"pattern": "/"}),
            json!("/"),
            json!([]),
            json!([{"action": "x"}]),
            json!([42]),
        ] {
            let err = router.init_from_value(&bad).unwrap_err();
            assert!(
                matches!(err, RouterError::InvalidRoutes(_)),
                "{bad} gave {err:?}"
            );
        }
        assert!(!router.is_initialised());
    }

    #[test]
    fn test_path_for() {
        let router = build(&["/", "/posts/:id/"]);
        let params: Params = [("id", "42")].into_iter().collect();

        assert_eq!(router.path_for("/posts/:id/", &params).unwrap(), "/posts/42/");
        assert_eq!(router.path_for("/", &Params::new()).unwrap(), "/");
        assert!(matches!(
            router.path_for("/posts/:id/", &Params::new()),
            Err(RouterError::InvalidPath(_))
        ));
        assert!(matches!(
            router.path_for("/users/:id/", &params),
            Err(RouterError::NotFound { .. })
        ));
    }
}

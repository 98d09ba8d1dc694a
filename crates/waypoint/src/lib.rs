//! # waypoint
//!
//! A minimal client-side URL router.
//!
//! This crate provides:
//! - Route patterns with literal and `:name` dynamic segments
//! - Deterministic first-declared-wins matching
//! - Path sanitization and query string decoding
//! - Reverse path generation from declared patterns
//!
//! ## Quick Start
//!
//! ```
//! use waypoint::{RouteDescriptor, Router};
//!
//! let mut router = Router::new();
//! router
//!     .init([
//!         RouteDescriptor::new("/").action("home"),
//!         RouteDescriptor::new("/about/").action("about"),
//!         RouteDescriptor::new("/:id/").action("detail"),
//!     ])
//!     .unwrap();
//!
//! let route = router.find_matching_route("/about", None).unwrap();
//! assert_eq!(route.action, Some(&"about"));
//!
//! let route = router.find_matching_route("/42/", Some("?tab=info")).unwrap();
//! assert_eq!(route.action, Some(&"detail"));
//! assert_eq!(route.request.params.get("id"), Some("42"));
//! assert_eq!(route.request.query.get("tab"), Some("info"));
//! ```
//!
//! ## Path Parameters
//!
//! Segments starting with `:` capture one or more non-`/` characters:
//!
//! ```
//! use waypoint::Capture;
//!
//! let capture = Capture::build("/posts/:post_id/comments/:comment_id/").unwrap();
//! let params = capture.match_path("/posts/1/comments/2/").unwrap();
//! assert_eq!(params.get("post_id"), Some("1"));
//! assert_eq!(params.get("comment_id"), Some("2"));
//! ```
//!
//! ## Errors
//!
//! Every failure is a [`RouterError`] carrying a stable [`RouterError::code`]:
//!
//! ```
//! use waypoint::{Router, ERROR_NOT_INITIALISED};
//!
//! let router: Router<()> = Router::new();
//! let err = router.find_matching_route("/", None).unwrap_err();
//! assert_eq!(err.code(), ERROR_NOT_INITIALISED);
//! ```

mod capture;
mod error;
mod query;
mod request;
mod route;
mod router;

pub use capture::{Capture, Segment};
pub use error::{
    Result, RouterError, ERROR_INVALID_PATH, ERROR_INVALID_PATTERN, ERROR_INVALID_ROUTES,
    ERROR_NOT_FOUND, ERROR_NOT_INITIALISED,
};
pub use query::parse_query_string;
pub use request::{Params, Request};
pub use route::{ResolvedRoute, Route, RouteDescriptor};
pub use router::{sanitize_path, Router};

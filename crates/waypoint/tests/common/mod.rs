#![allow(dead_code)]

use std::sync::Arc;

use waypoint::{ResolvedRoute, RouteDescriptor, Router, RouterError};

/// A view-producing callable, as handed to a renderer.
pub type Action = Arc<dyn Fn(&waypoint::Request) -> String + Send + Sync>;

pub fn router(patterns: &[&str]) -> Router<&'static str> {
    let mut router = Router::new();
    router
        .init(patterns.iter().map(|p| RouteDescriptor::new(*p)))
        .unwrap_or_else(|e| panic!("Failed to init {patterns:?}: {e}"));
    router
}

pub fn resolve<'r, A>(router: &'r Router<A>, path: &str, query: Option<&str>) -> ResolvedRoute<'r, A> {
    router
        .find_matching_route(path, query)
        .unwrap_or_else(|e| panic!("Failed to resolve {path}: {e}"))
}

pub fn resolve_err<A>(router: &Router<A>, path: &str) -> RouterError {
    match router.find_matching_route(path, None) {
        Ok(route) => panic!("Expected error for {path}, matched {}", route.pattern),
        Err(e) => e,
    }
}

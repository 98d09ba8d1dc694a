//! Route declarations and resolved routes.

use serde::{Deserialize, Serialize};

use crate::request::Request;

/// A consumer-supplied route declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteDescriptor<A> {
    /// Route pattern, e.g. `/:id/edit/`.
    pub pattern: String,
    /// Action associated with the route.
    pub action: Option<A>,
}

impl<A> RouteDescriptor<A> {
    /// Creates a declaration with no action.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            action: None,
        }
    }

    /// Sets the action.
    #[must_use]
    pub fn action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }
}

/// A declared route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<A> {
    /// Route pattern.
    pub pattern: String,
    /// Action associated with the route, if any.
    pub action: Option<A>,
}

impl<A> Route<A> {
    /// Binds a request to this route.
    #[must_use]
    pub fn resolve(&self, request: Request) -> ResolvedRoute<'_, A> {
        ResolvedRoute {
            pattern: &self.pattern,
            action: self.action.as_ref(),
            request,
        }
    }
}

impl<A> From<RouteDescriptor<A>> for Route<A> {
    fn from(descriptor: RouteDescriptor<A>) -> Self {
        Self {
            pattern: descriptor.pattern,
            action: descriptor.action,
        }
    }
}

/// The result of a successful match.
///
/// Each call to `find_matching_route` returns a fresh value; the declared
/// route is never mutated.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedRoute<'r, A> {
    /// Pattern of the matched route.
    pub pattern: &'r str,
    /// Action of the matched route.
    pub action: Option<&'r A>,
    /// Request context for this match.
    pub request: Request,
}

impl<A> Clone for ResolvedRoute<'_, A> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern,
            action: self.action,
            request: self.request.clone(),
        }
    }
}

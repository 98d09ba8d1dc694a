//! Error types for routing.

use thiserror::Error;

/// Code reported when matching is attempted before a successful `init`.
pub const ERROR_NOT_INITIALISED: &str = "ERROR_NOT_INITIALISED";
/// Code reported when `init` receives an absent, malformed or empty route list.
pub const ERROR_INVALID_ROUTES: &str = "ERROR_INVALID_ROUTES";
/// Code reported when a path to resolve is not a string.
pub const ERROR_INVALID_PATH: &str = "ERROR_INVALID_PATH";
/// Code reported when no declared pattern matches a path.
pub const ERROR_NOT_FOUND: &str = "ERROR_NOT_FOUND";
/// Code reported when a route pattern cannot be compiled.
pub const ERROR_INVALID_PATTERN: &str = "ERROR_INVALID_PATTERN";

/// Router-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// Matching was attempted before the router was initialised.
    #[error("router used before initialisation")]
    NotInitialised,

    /// The route declarations passed to `init` were unusable.
    #[error("invalid routes: {0}")]
    InvalidRoutes(String),

    /// The path to resolve was not a string.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// No declared route matched the sanitized path.
    #[error("no route matched: {path}")]
    NotFound {
        /// The sanitized path that failed to match.
        path: String,
    },

    /// A route pattern could not be compiled.
    #[error("invalid path pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl RouterError {
    /// Returns the stable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotInitialised => ERROR_NOT_INITIALISED,
            Self::InvalidRoutes(_) => ERROR_INVALID_ROUTES,
            Self::InvalidPath(_) => ERROR_INVALID_PATH,
            Self::NotFound { .. } => ERROR_NOT_FOUND,
            Self::InvalidPattern { .. } => ERROR_INVALID_PATTERN,
        }
    }

    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;

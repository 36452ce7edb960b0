//! Error types for reference resolution.

use thiserror::Error;

/// Failures reported by a [`ContentService`](crate::ContentService).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// No content exists at the locator.
    #[error("no content at {locator}")]
    NotFound { locator: String },

    /// The backing store failed.
    #[error("content service failure: {0}")]
    Backend(String),
}

/// Convenience alias for content service calls.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur while resolving a reference.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// A content service call failed.
    #[error("{operation} failed: {source}")]
    Service {
        operation: &'static str,
        #[source]
        source: ServiceError,
    },

    /// A repository path that no content is bound to.
    #[error("repository path does not resolve: {path}")]
    Unresolved { path: String },

    /// The resource lives outside the repository.
    #[error("not a repository resource: {resource}")]
    NotRepository { resource: String },
}

impl ResolveError {
    /// Adapter for `map_err` that tags a service error with its operation.
    pub fn service(operation: &'static str) -> impl FnOnce(ServiceError) -> Self {
        move |source| ResolveError::Service { operation, source }
    }
}

/// Convenience alias for resolution.
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

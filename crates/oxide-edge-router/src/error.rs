//! Error types for routing.

use thiserror::Error;

/// Boxed error returned by a failing handler.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Router-specific errors.
///
/// A request that matches no route is not an error: [`Router::resolve`]
/// returns `None` and [`Router::route`] answers with a 404.
///
/// [`Router::resolve`]: crate::Router::resolve
/// [`Router::route`]: crate::Router::route
#[derive(Debug, Error)]
pub enum RouterError {
    /// A path pattern failed to compile as a regular expression.
    #[error("invalid path pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The pattern as registered.
        pattern: String,
        /// The regex compiler's complaint.
        #[source]
        source: regex::Error,
    },

    /// The matched handler failed. Passed through untouched.
    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),

    /// The handler's value could not be serialized as JSON.
    #[error("failed to serialize handler output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;

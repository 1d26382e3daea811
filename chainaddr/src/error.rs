//! Error types for name resolution.
//!
//! Native handlers never surface errors: a format failure simply means the
//! text is not an address of that network. Domain handlers collapse
//! [`ResolutionError`] to `false` in `can_accept`, but keep it available
//! through their `lookup` methods.

use std::time::Duration;

/// Boxed transport error, as returned by HTTP clients.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to resolve a human-readable name to an address.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    /// The text is not shaped like a name this service can resolve.
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// The name exists but has no address for the requested record.
    #[error("No {record} record for {name}")]
    NotFound {
        /// The name that was resolved.
        name: String,
        /// The record key or coin code that was looked up.
        record: String,
    },

    /// The name service answered with an unexpected HTTP status.
    #[error("Name service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("Name service request failed: {0}")]
    Transport(#[source] BoxError),

    /// The response was received but could not be interpreted.
    #[error("Malformed name service response: {0}")]
    Malformed(String),

    /// The resolution attempt did not finish in time.
    #[error("Name resolution timed out after {0:?}")]
    Timeout(Duration),
}

impl ResolutionError {
    /// Creates a [`ResolutionError::NotFound`] error.
    pub fn not_found(name: impl Into<String>, record: impl Into<String>) -> Self {
        Self::NotFound {
            name: name.into(),
            record: record.into(),
        }
    }

    /// Wraps a transport-level error.
    pub fn transport(error: impl Into<BoxError>) -> Self {
        Self::Transport(error.into())
    }

    /// Returns `true` if the service was reachable and answered that the name
    /// has no matching address.
    ///
    /// All other variants mean the name may exist but could not be resolved.
    #[must_use]
    pub const fn is_definitive(&self) -> bool {
        matches!(self, Self::InvalidName(_) | Self::NotFound { .. })
    }
}

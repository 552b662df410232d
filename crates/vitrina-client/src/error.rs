//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to a resource endpoint.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure: server unreachable, connection reset, timeout.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code returned by the server.
        status: u16,
        /// Server-provided detail or the canonical status reason.
        message: String,
    },

    /// The server refused a create/update body (duplicate, missing field, ...).
    #[error("rejected by server ({status}): {detail}")]
    Rejected {
        /// HTTP status code returned by the server.
        status: u16,
        /// Server-provided validation detail.
        detail: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The resource schema does not declare a route for this operation.
    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

impl ClientError {
    /// HTTP status carried by the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Rejected { status, .. } => Some(*status),
            Self::Network(_) | Self::Parse(_) | Self::Unsupported(_) => None,
        }
    }

    /// Whether the request never got an HTTP answer.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

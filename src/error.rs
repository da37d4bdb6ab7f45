//! Error types for the challenge client

use thiserror::Error;

/// Failure talking to the challenge backend.
///
/// Never crosses the public store operations as a panic: the store turns it
/// into an empty list, an absent challenge or an `Err` the caller may ignore.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network failure, timeout or connection refused
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Header value rejected while building the client
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Challenge id that cannot be sent as a URL path segment
    #[error("Invalid challenge id: {0:?}")]
    InvalidId(String),
}

impl TransportError {
    /// Status code for server-side failures
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Server { status, .. } => Some(*status),
            TransportError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Timing lookup for a challenge id with no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("Challenge {0} is not tracked")]
    NotTracked(String),
}

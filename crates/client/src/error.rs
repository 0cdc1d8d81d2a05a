use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the client. Nothing is retried or swallowed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server could not be reached (DNS, refused connection, timeout)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Request failed with status {status}: {body}")]
    Request {
        /// Status returned by the server
        status: StatusCode,
        /// Raw response body, empty if it could not be read
        body: String,
    },

    /// A 2xx response whose body was not the expected JSON
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] reqwest::Error),

    /// A 2xx response lacking a header the call depends on
    #[error("Response is missing the '{0}' header")]
    MissingHeader(&'static str),

    /// The value cannot be sent as an Authorization header
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// A path segment that cannot be addressed on its own (empty, `.` or `..`)
    #[error("Invalid path segment: '{0}'")]
    InvalidPathSegment(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status of a [`ClientError::Request`], if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type ClientResult<T> = Result<T, ClientError>;

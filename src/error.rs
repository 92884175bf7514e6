//! Error types and transient/fatal classification for REST operations.

use thiserror::Error;

/// Result alias used by every [`RestClient`](crate::RestClient) operation.
pub type Result<T, E = RestError> = std::result::Result<T, E>;

/// Whether a failed attempt is worth repeating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Recoverable by retrying (network trouble, timeouts, server errors).
    Transient,
    /// Will fail the same way on every attempt.
    Fatal,
}

/// Errors returned by REST clients and by the retrying decorator.
#[derive(Debug, Error)]
pub enum RestError {
    /// The request never produced a response (refused, reset, DNS, ...).
    #[error("{0}")]
    Network(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded into the requested type.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A fatal error cut a retried operation short.
    #[error("{context} after {attempts} attempts")]
    Aborted {
        context: String,
        attempts: usize,
        #[source]
        source: Box<RestError>,
    },

    /// Every attempt failed with a transient error.
    #[error("{context}: retries exhausted after {attempts} attempts")]
    Exhausted {
        context: String,
        attempts: usize,
        #[source]
        source: Option<Box<RestError>>,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RestError {
    /// Creates a transient network error.
    pub fn network(message: impl Into<String>) -> Self {
        RestError::Network(message.into())
    }

    /// Creates a fatal error from an arbitrary message.
    pub fn other(message: impl std::fmt::Display) -> Self {
        RestError::Other(anyhow::anyhow!("{}", message))
    }

    /// Classifies the error.
    ///
    /// Server errors (5xx) are transient, every other status is fatal since
    /// client errors won't succeed on retry. Errors produced by a retrying
    /// client are always fatal, so stacked decorators never multiply attempts.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RestError::Network(_) | RestError::Timeout(_) => ErrorKind::Transient,
            RestError::Status { status, .. } if (500..600).contains(status) => {
                ErrorKind::Transient
            }
            _ => ErrorKind::Fatal,
        }
    }

    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}

impl From<reqwest::Error> for RestError {
    fn from(error: reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            let reason = status.canonical_reason().unwrap_or("Unknown Status");
            let message = match error.url() {
                Some(url) => format!("{} ({})", reason, url),
                None => reason.to_string(),
            };
            return RestError::Status {
                status: status.as_u16(),
                message,
            };
        }

        let message = error.to_string();

        if error.is_timeout() {
            RestError::Timeout(message)
        } else if error.is_connect() || error.is_request() || error.is_body() {
            RestError::Network(message)
        } else if error.is_decode() {
            RestError::Decode(message)
        } else {
            RestError::Other(anyhow::Error::from(error))
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(error: serde_json::Error) -> Self {
        RestError::Decode(error.to_string())
    }
}

/// Invalid retry configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
}

//! Provider transport errors and their failure classes.

use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::{FailureClass, ProviderError, ProviderOperation};

/// Errors that can occur when talking to the flight data provider
#[derive(Error, Debug)]
pub enum ProviderApiError {
    /// No API key configured
    #[error("Provider API key is not configured")]
    MissingCredentials,

    /// Credentials or host cannot be sent as HTTP headers
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// Client configuration rejected before any request was made
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid or expired API key (HTTP 401/403)
    #[error("Authentication failed ({0}): {1}")]
    Unauthorized(StatusCode, String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimitExceeded,

    /// Server error from the provider (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network, connection or timeout error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body was not JSON at all
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Any other non-success status
    #[error("Unknown error ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl ProviderApiError {
    /// Map a non-success HTTP status and its body to an error variant.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::Unauthorized(status, body),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            status if status.is_server_error() => Self::ServerError(status, body),
            _ => Self::UnknownError(status, body),
        }
    }

    /// Collapse into one of the three reported failure classes.
    pub fn class(&self) -> FailureClass {
        match self {
            Self::RateLimitExceeded => FailureClass::RateLimited,
            Self::Unauthorized(_, _) | Self::MissingCredentials => FailureClass::Unauthorized,
            _ => FailureClass::Unknown,
        }
    }

    /// Convert into the user-facing error for `operation`.
    pub fn classify(&self, operation: ProviderOperation) -> ProviderError {
        ProviderError::new(self.class(), operation)
    }

    /// True for timeouts reported by the HTTP client.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::NetworkError(e) if e.is_timeout())
    }
}

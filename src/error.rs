use serde::{Deserialize, Serialize};
use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned by the API for any non-200 response.
///
/// `status` is always taken from the HTTP status line, never from the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub status: u16,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "api error (status {})", self.status)
        } else {
            write!(f, "{} (status {})", self.message, self.status)
        }
    }
}

impl std::error::Error for ApiError {}

/// Raised when 429 responses could not be absorbed by the retry loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitedError {
    pub message: String,
}

impl fmt::Display for RateLimitedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RateLimitedError {}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid request url: {0}")]
    Build(#[from] url::ParseError),

    #[error("failed to build request: {0}")]
    Request(String),

    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request cancelled")]
    Cancelled,

    #[error(transparent)]
    RateLimited(#[from] RateLimitedError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("oauth2 token request failed: {0}")]
    Auth(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.status),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

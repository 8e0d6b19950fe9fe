use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::{error_body::ErrorBody, rate_limit::RateLimitInfo};

/// `errorCode` RoVer sends when the failure happened on the Discord side.
pub const DISCORD_ERROR_CODE: &str = "discord_error";

/// Details shared by every error the RoVer API itself reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
    pub error_code: Option<String>,
    pub detail: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, &self.error_code) {
            (Some(status), Some(code)) => write!(f, "{} ({status}, {code})", self.message),
            (Some(status), None) => write!(f, "{} ({status})", self.message),
            (None, Some(code)) => write!(f, "{} ({code})", self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

/// A unified error type for this library.
#[derive(Debug, Error)]
pub enum RoverError {
    /// Invalid, revoked or under-privileged API key (includes RoVer Plus gating).
    #[error("Authentication Error: {0}")]
    Authentication(ApiError),

    /// The requested link does not exist.
    #[error("Not Found: {0}")]
    NotFound(ApiError),

    /// The request was throttled. Nothing is retried automatically.
    #[error("Rate Limited: {error}")]
    RateLimit {
        error: ApiError,
        retry_after: Option<Duration>,
        info: RateLimitInfo,
    },

    /// RoVer reported a failure coming from Discord (e.g. the bot lost guild access).
    #[error("Discord Error: {0}")]
    Discord(ApiError),

    /// 5xx, an unrecognised error status, or a body we could not decode.
    #[error("Server Error: {error}, body: {body}")]
    Server { error: ApiError, body: String },

    /// Connection failures and timeouts.
    #[error("Transport Error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl RoverError {
    /// The API-level details, if RoVer produced this error.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Authentication(e) | Self::NotFound(e) | Self::Discord(e) => Some(e),
            Self::RateLimit { error, .. } | Self::Server { error, .. } => Some(error),
            Self::Transport(_) | Self::Config(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => self.api_error().and_then(|e| e.status),
        }
    }

    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }

    /// Error for calls made after the key was revoked.
    pub(crate) fn revoked() -> Self {
        Self::Authentication(ApiError::new(
            "API key has been revoked; create a new client with a fresh key",
        ))
    }
}

/// Map a non-success response onto the error taxonomy.
///
/// `body` is decoded best-effort: a body that is not a JSON object still
/// yields an error of the right kind, with the raw text as its message.
pub fn map_error_response(
    status: StatusCode,
    rate_limit: RateLimitInfo,
    body: &[u8],
) -> RoverError {
    let raw = String::from_utf8_lossy(body).into_owned();
    let parsed = serde_json::from_slice::<ErrorBody>(body).ok();

    let error = match parsed {
        Some(b) => ApiError {
            message: b
                .message
                .unwrap_or_else(|| "Unknown error occurred".to_string()),
            status: Some(status.as_u16()),
            error_code: b.error_code,
            detail: b.detail,
        },
        None => ApiError {
            message: if raw.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error occurred")
                    .to_string()
            } else {
                raw.clone()
            },
            status: Some(status.as_u16()),
            error_code: None,
            detail: None,
        },
    };

    if error.error_code.as_deref() == Some(DISCORD_ERROR_CODE) {
        return RoverError::Discord(error);
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => RoverError::RateLimit {
            error,
            retry_after: rate_limit.retry_after,
            info: rate_limit,
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RoverError::Authentication(error),
        StatusCode::NOT_FOUND => RoverError::NotFound(error),
        _ => RoverError::Server { error, body: raw },
    }
}

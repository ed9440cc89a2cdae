// src/error.rs
//! Application error types with structured error handling.
//!
//! Error types form the vocabulary for failure modes in the backup.
//! The split that matters is between errors that abort the whole crawl
//! (API errors, exhausted transport retries, IO) and per-item conditions
//! that are skipped and counted instead of raised.

use std::fmt;
use thiserror::Error;

/// Platform error codes as a typed vocabulary.
///
/// The open platform reports failures through a numeric `code` field in the
/// response envelope. Only the codes that change how an operator reacts are
/// named; everything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// The access token is malformed or expired; a fresh login is required
    InvalidAccessToken,
    /// The request frequency limit was hit
    RateLimited,
    /// The user has no permission on the requested resource
    PermissionDenied,
    /// The requested document, folder or space no longer exists
    NotFound,
    /// The platform failed internally
    InternalError,
    /// A code this client does not know
    Other(i64),
}

impl ApiErrorCode {
    /// Classify a raw envelope code.
    pub fn from_code(code: i64) -> Self {
        match code {
            99991661 | 99991663 | 99991668 | 99991677 => Self::InvalidAccessToken,
            99991400 => Self::RateLimited,
            99991672 | 99991679 | 91204 | 1770032 => Self::PermissionDenied,
            91402 | 1770002 | 131005 => Self::NotFound,
            99991500..=99991599 => Self::InternalError,
            other => Self::Other(other),
        }
    }

    /// Whether a new login would fix this error.
    pub fn needs_login(&self) -> bool {
        matches!(self, Self::InvalidAccessToken)
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAccessToken => write!(f, "invalid access token"),
            Self::RateLimited => write!(f, "rate limited"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::NotFound => write!(f, "not found"),
            Self::InternalError => write!(f, "internal server error"),
            Self::Other(code) => write!(f, "code {}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Request to {url} failed with {kind} ({code}): {msg}")]
    Api {
        url: String,
        code: i64,
        kind: ApiErrorCode,
        msg: String,
        /// The full response envelope, kept for the fatal log line.
        envelope: String,
    },

    #[error("HTTP {status} from {url}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown time zone '{0}'")]
    UnknownTimeZone(String),

    #[error("Maximum block nesting depth ({0}) exceeded")]
    RecursionLimitExceeded(usize),

    #[error("A backup is already running")]
    CrawlBusy,

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether retrying the same request could succeed.
    ///
    /// Only transport failures qualify. An envelope with a non-zero code is
    /// an answer from the platform, so it is never retried.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::NetworkFailure(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            AppError::HttpStatus { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

// Allow converting from anyhow::Error, preserving error chain
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError {
            message: err.to_string(),
            source: None,
        }
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(err: std::fmt::Error) -> Self {
        AppError::InternalError {
            message: "Formatting error".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError {
            message: "Backup task stopped unexpectedly".to_string(),
            source: Some(Box::new(err)),
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

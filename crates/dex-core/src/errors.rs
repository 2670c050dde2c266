//! Cross-cutting error types for the Pokedex service.
//!
//! Component errors (`SourceError`, `DatabaseError`, `ConfigError`) live in
//! their own crates and each report an [`ErrorCode`]. The integration
//! pipeline converges them into [`ServiceError`], which is what callers see.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed cause attached to a wrapping error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Stable, machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Caller-supplied data is unusable. Not retryable.
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// The referenced pokemon does not exist. Not retryable.
    #[serde(rename = "POKEMON_NOT_FOUND")]
    NotFound,
    /// A pokemon with the same id is already stored. Not retryable.
    #[serde(rename = "POKEMON_ALREADY_EXISTS")]
    Conflict,
    /// The external source failed or rejected the lookup.
    #[serde(rename = "API_ERROR")]
    ApiError,
    /// The local store failed.
    #[serde(rename = "STORAGE_ERROR")]
    StorageError,
    /// Anything else that went wrong locally.
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::NotFound => "POKEMON_NOT_FOUND",
            Self::Conflict => "POKEMON_ALREADY_EXISTS",
            Self::ApiError => "API_ERROR",
            Self::StorageError => "STORAGE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether repeating the same request may succeed.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::ApiError | Self::StorageError | Self::InternalError
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by every pipeline operation.
///
/// `Display` renders only the message. Wrapped causes stay reachable through
/// [`std::error::Error::source`] for logging and are never sent to callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Conflict {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// External source failure. `status` is the upstream HTTP status, if any.
    #[error("{message}")]
    Api {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<BoxError>,
    },

    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl ServiceError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Conflict {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn api(message: impl Into<String>, status: Option<u16>, source: Option<BoxError>) -> Self {
        Self::Api {
            message: message.into(),
            status,
            source,
        }
    }

    pub fn internal(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Internal error with no underlying cause (e.g. misconfiguration).
    pub fn internal_msg(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput(_) => ErrorCode::InvalidInput,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Conflict { .. } => ErrorCode::Conflict,
            Self::Api { .. } => ErrorCode::ApiError,
            Self::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// HTTP status the caller should receive for this error.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) | Self::Api { status: Some(404), .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Api { .. } | Self::Internal { .. } => 500,
        }
    }

    /// The human-readable message without the cause chain.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidInput(message) | Self::NotFound(message) => message,
            Self::Conflict { message, .. }
            | Self::Api { message, .. }
            | Self::Internal { message, .. } => message,
        }
    }

    /// Message followed by every cause, `": "`-separated. For logs only.
    #[must_use]
    pub fn chain(&self) -> String {
        let mut out = self.message().to_string();
        let mut next = std::error::Error::source(self);
        while let Some(cause) = next {
            out.push_str(": ");
            out.push_str(&cause.to_string());
            next = cause.source();
        }
        out
    }
}

//! External source error types.

use dex_core::errors::ErrorCode;
use thiserror::Error;

/// Errors that can occur when looking up a pokemon on PokeAPI.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No base URL was configured for the external source.
    #[error("PokeAPI base URL is not configured")]
    NotConfigured,

    /// The name was empty after trimming whitespace.
    #[error("Pokemon name must not be empty")]
    EmptyName,

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The lookup URL could not be constructed from the base URL.
    #[error("invalid lookup URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as assembled before parsing.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The caller's deadline had already passed before the request was sent.
    #[error("request deadline exceeded before contacting PokeAPI")]
    DeadlineExceeded,

    /// HTTP transport error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// PokeAPI returned a non-success status code.
    #[error("PokeAPI returned unexpected status code: {status}")]
    Status {
        /// HTTP status code returned by PokeAPI.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// PokeAPI returned a 429 Too Many Requests response.
    #[error("rate limited by PokeAPI, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// A successful PokeAPI response was larger than the client accepts.
    #[error("PokeAPI response exceeded {limit} bytes")]
    BodyTooLarge {
        /// Byte limit that was crossed.
        limit: usize,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode PokeAPI response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl SourceError {
    /// Error category as seen by callers of the pipeline.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyName | Self::NotConfigured => ErrorCode::InvalidInput,
            Self::Client(_) | Self::Decode(_) => ErrorCode::InternalError,
            Self::InvalidUrl { .. }
            | Self::DeadlineExceeded
            | Self::Http(_)
            | Self::Status { .. }
            | Self::RateLimited { .. }
            | Self::BodyTooLarge { .. } => ErrorCode::ApiError,
        }
    }

    /// Upstream HTTP status, when PokeAPI answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

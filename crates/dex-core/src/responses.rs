//! JSON envelopes returned by the HTTP surface.
//!
//! Successful calls answer `{ code, message, data }`; failures answer
//! `{ error, code }` where `code` is an [`ErrorCode`] string.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorCode, ServiceError};

/// Success envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 200,
            message: message.into(),
            data,
        }
    }
}

/// Failure envelope. Carries the message only, never the cause chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub code: ErrorCode,
}

impl From<&ServiceError> for ErrorBody {
    fn from(err: &ServiceError) -> Self {
        Self {
            error: err.message().to_string(),
            code: err.code(),
        }
    }
}

/// Response from `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub pokemons: u64,
}

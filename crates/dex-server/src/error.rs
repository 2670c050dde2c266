//! Mapping pipeline errors onto HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dex_core::errors::ServiceError;
use dex_core::responses::ErrorBody;

/// Handler error: a [`ServiceError`] rendered as `{ error, code }`.
#[derive(Debug)]
pub struct AppError(pub ServiceError);

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(code = %self.0.code(), error = %self.0.chain(), "request failed");
        } else {
            tracing::debug!(code = %self.0.code(), error = %self.0.message(), "request rejected");
        }
        (status, Json(ErrorBody::from(&self.0))).into_response()
    }
}

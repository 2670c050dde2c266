//! Converging component errors into `ServiceError`.
//!
//! Categorised errors keep their category; only the caller-facing message
//! is chosen here. The component error is attached as the source.

use dex_core::errors::{ErrorCode, ServiceError};
use dex_db::error::DatabaseError;
use dex_source::SourceError;

pub fn from_source(error: SourceError) -> ServiceError {
    let message = match &error {
        SourceError::InvalidUrl { .. } => "Failed to create request".to_string(),
        SourceError::Http(_) => "Failed to request PokeAPI".to_string(),
        SourceError::Decode(_) => "Error decoding JSON response".to_string(),
        other => other.to_string(),
    };
    match error.code() {
        ErrorCode::InvalidInput => ServiceError::invalid_input(message),
        ErrorCode::ApiError => {
            let status = error.status();
            ServiceError::api(message, status, Some(Box::new(error)))
        }
        _ => ServiceError::internal(message, error),
    }
}

/// Wrap a store failure that has no dedicated category at this layer.
pub fn from_store(error: DatabaseError, message: &str) -> ServiceError {
    ServiceError::internal(message, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_error_keeps_upstream_status() {
        let err = from_source(SourceError::Status {
            status: 404,
            body: "Not Found".into(),
        });
        assert_eq!(err.code(), ErrorCode::ApiError);
        assert_eq!(err.message(), "PokeAPI returned unexpected status code: 404");
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn decode_error_is_internal_with_cause() {
        let decode = serde_json_error();
        let err = from_source(SourceError::Decode(decode));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "Error decoding JSON response");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn empty_name_is_invalid_input() {
        let err = from_source(SourceError::EmptyName);
        assert_eq!(err.code(), ErrorCode::InvalidInput);
        assert_eq!(err.message(), "Pokemon name must not be empty");
    }

    #[test]
    fn missing_base_url_is_invalid_input() {
        let err = from_source(SourceError::NotConfigured);
        assert_eq!(err.code(), ErrorCode::InvalidInput);
        assert_eq!(err.message(), "PokeAPI base URL is not configured");
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn store_failure_chain_is_preserved() {
        let err = from_store(DatabaseError::Timeout, "Error getting pokemons from database");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(
            err.chain(),
            "Error getting pokemons from database: database operation timed out"
        );
    }

    fn serde_json_error() -> serde_json::Error {
        serde_json::from_str::<u8>("x").unwrap_err()
    }
}

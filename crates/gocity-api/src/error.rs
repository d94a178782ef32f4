//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>` so storage
//! failures render with a consistent status and JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gocity_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

#[derive(Debug)]
pub enum HttpAppError {
    Storage(StorageError),
    InvalidInput(String),
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError::Storage(err)
    }
}

impl HttpAppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            HttpAppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
            HttpAppError::Storage(StorageError::InvalidKey(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_PROJECT_NAME")
            }
            HttpAppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match self {
            HttpAppError::Storage(e) => {
                if status.is_server_error() {
                    tracing::error!(error = %e, code, "Storage error");
                    "Storage is temporarily unavailable".to_string()
                } else {
                    tracing::debug!(error = %e, code, "Rejected request");
                    e.to_string()
                }
            }
            HttpAppError::InvalidInput(message) => {
                tracing::debug!(error = %message, code, "Rejected request");
                message
            }
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_maps_to_bad_request() {
        let err = HttpAppError::from(StorageError::InvalidKey("empty".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_transport_failure_maps_to_server_error() {
        for err in [
            StorageError::DownloadFailed("timeout".to_string()),
            StorageError::UploadFailed("commit rejected".to_string()),
            StorageError::ConfigError("no credentials".to_string()),
        ] {
            assert_eq!(
                HttpAppError::from(err).into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}

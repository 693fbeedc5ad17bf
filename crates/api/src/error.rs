//! Unified error handling for the API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Repository operation failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Failures that are the server's fault and worth capturing.
    fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Internal(_)
                | Self::Repository(
                    RepositoryError::Database(_)
                        | RepositoryError::QueryFailed(_)
                        | RepositoryError::DataCorruption(_)
                        | RepositoryError::Timeout
                )
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "API request error"
            );
        }

        let (status, message) = match &self {
            Self::Repository(repo) => match repo {
                // Both map to 404, but with distinct messages: callers can
                // tell a missing store from a missing product inside one.
                RepositoryError::StoreNotFound => {
                    (StatusCode::NOT_FOUND, "store not found".to_owned())
                }
                RepositoryError::ProductNotFound => {
                    (StatusCode::NOT_FOUND, "product not found in store".to_owned())
                }
                RepositoryError::AlreadyExists | RepositoryError::Conflict(_) => {
                    (StatusCode::CONFLICT, repo.to_string())
                }
                RepositoryError::Timeout => (
                    StatusCode::GATEWAY_TIMEOUT,
                    "store operation timed out".to_owned(),
                ),
                // Don't expose internal error details to clients
                RepositoryError::Database(_)
                | RepositoryError::QueryFailed(_)
                | RepositoryError::DataCorruption(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                ),
            },
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_owned(),
            ),
        };

        (status, message).into_response()
    }
}

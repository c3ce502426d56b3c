use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::storage::StorageError;
use sea_orm::DbErr;
use serde::Serialize;

use crate::extraction::ExtractionError;

/// JSON error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Short human-readable error description.
    #[schema(example = "vendor.name must be a non-empty string")]
    pub error: String,
    /// Underlying cause, forwarded verbatim for operator visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application-level error type.
///
/// Maps the four failure families onto HTTP statuses: validation (400),
/// not-found (404), upstream extraction failure (500), and storage failure
/// (500). Nothing is retried automatically anywhere in the service.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or missing required input.
    Validation(String),
    /// The referenced id does not exist.
    NotFound(String),
    /// The remote extraction call failed or produced unusable output.
    Upstream(String),
    /// Blob or record store failure.
    Storage(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: msg,
                    details: None,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: msg,
                    details: None,
                },
            ),
            AppError::Upstream(detail) => {
                tracing::error!("Extraction failed: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Extraction failed".into(),
                        details: Some(detail),
                    },
                )
            }
            AppError::Storage(detail) => {
                tracing::error!("Storage error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Storage error".into(),
                        details: Some(detail),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        error: "Internal error".into(),
                        details: Some(detail),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => AppError::NotFound(format!("File not found: {id}")),
            StorageError::SizeLimitExceeded { .. } => AppError::Validation(err.to_string()),
            other => AppError::Storage(other.to_string()),
        }
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

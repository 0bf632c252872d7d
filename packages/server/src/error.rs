use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::services::ServiceError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `CONFLICT`, `UPLOAD_FAILED`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "title must be 1-256 characters")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    Conflict(String),
    /// The storage backend rejected or failed an upload.
    Upload(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                },
            ),
            AppError::Upload(detail) => {
                tracing::error!("Upload failed: {}", detail);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody {
                        code: "UPLOAD_FAILED",
                        message: "The file could not be stored".into(),
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
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
        AppError::Internal(err.to_string())
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::NotFound(what) => AppError::NotFound(format!("{what} not found")),
            ServiceError::Conflict(msg) => AppError::Conflict(msg),
            ServiceError::Upload(e) => AppError::Upload(e.to_string()),
            ServiceError::Persistence(e) => AppError::Internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use common::storage::StorageError;

    use super::*;

    fn status_of(err: ServiceError) -> (StatusCode, &'static str) {
        let (status, body) = AppError::from(err).status_and_body();
        (status, body.code)
    }

    #[test]
    fn service_errors_map_to_statuses() {
        assert_eq!(
            status_of(ServiceError::Validation("bad".into())),
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        );
        assert_eq!(
            status_of(ServiceError::NotFound("Project".into())),
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        );
        assert_eq!(
            status_of(ServiceError::Conflict("dup".into())),
            (StatusCode::CONFLICT, "CONFLICT")
        );
        assert_eq!(
            status_of(ServiceError::Upload(StorageError::Remote {
                status: 503,
                body: String::new(),
            })),
            (StatusCode::BAD_GATEWAY, "UPLOAD_FAILED")
        );
        assert_eq!(
            status_of(ServiceError::Persistence(DbErr::Custom("x".into()))),
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        );
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let (_, body) = AppError::Internal("password=hunter2".into()).status_and_body();
        assert!(!body.message.contains("hunter2"));
    }
}

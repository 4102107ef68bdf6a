//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, GuestListError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Domain logic error.
    Domain(DomainError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Domain(err) => domain_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg)
            }
        };

        let body = serde_json::json!({ "error": message, "code": code });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, &'static str, String) {
    match &err {
        DomainError::GuestList(rejection) => {
            let status = match rejection {
                GuestListError::GuestAlreadyExists { .. }
                | GuestListError::GuestWithThatNameAlreadyExists { .. }
                | GuestListError::HouseholdAlreadyExists { .. }
                | GuestListError::GuestAlreadyInAnotherHousehold { .. } => StatusCode::CONFLICT,
                GuestListError::GuestNotFound { .. } | GuestListError::HouseholdNotFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                GuestListError::GuestsNotFoundInHousehold { .. }
                | GuestListError::HouseholdMismatch { .. }
                | GuestListError::Invalid(_) => StatusCode::BAD_REQUEST,
            };
            (status, rejection.code(), rejection.to_string())
        }
        DomainError::Persistence { .. } if err.is_conflict() => {
            (StatusCode::CONFLICT, "CONCURRENCY_CONFLICT", err.to_string())
        }
        _ => {
            tracing::error!(error = %err, "domain operation failed");
            let code = match &err {
                DomainError::Persistence { .. } => "PERSISTENCE_ERROR",
                DomainError::CorruptSnapshot(_) => "CORRUPT_SNAPSHOT",
                DomainError::InvariantBroken { .. } => "INVARIANT_VIOLATION",
                _ => "INTERNAL_ERROR",
            };
            (StatusCode::INTERNAL_SERVER_ERROR, code, err.to_string())
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

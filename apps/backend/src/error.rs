//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use learn_core::{ImportError, LearnError};
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Data inconsistency: {0}")]
    DataInconsistency(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Parse(_) => (StatusCode::BAD_REQUEST, "parse_error"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "invalid_state"),
            ApiError::DataInconsistency(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "data_inconsistency")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<LearnError> for ApiError {
    fn from(err: LearnError) -> Self {
        let message = err.to_string();
        match err {
            LearnError::StudySetNotFound(_)
            | LearnError::FlashcardNotFound(_)
            | LearnError::FolderNotFound(_)
            | LearnError::SessionNotFound(_)
            | LearnError::ProgressNotFound(_) => ApiError::NotFound(message),
            LearnError::ProgressNotInSession { .. } | LearnError::SessionCompleted(_) => {
                ApiError::Conflict(message)
            }
            LearnError::EmptyStudySet(_)
            | LearnError::EmptySelection(_)
            | LearnError::EmptySession(_)
            | LearnError::InvalidMasteryGoal
            | LearnError::InvalidFolderParent { .. } => ApiError::BadRequest(message),
            LearnError::MissingFlashcard { .. } => ApiError::DataInconsistency(message),
            LearnError::StoreUnavailable(_) => ApiError::Internal(message),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::Parse(err.to_string())
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_unauthorized_status() {
        let error = ApiError::Unauthorized("invalid token".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_not_found_status() {
        let error = ApiError::NotFound("session 123".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_status() {
        let error = ApiError::BadRequest("invalid input".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_parse_error_status() {
        let error = ApiError::from(ImportError::NoPairsDetected);
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_error_status() {
        let error = ApiError::Internal("unexpected error".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_learn_errors_map_to_statuses() {
        let id = Uuid::new_v4();
        let cases = [
            (LearnError::SessionNotFound(id), StatusCode::NOT_FOUND),
            (LearnError::StudySetNotFound(id), StatusCode::NOT_FOUND),
            (LearnError::FlashcardNotFound(id), StatusCode::NOT_FOUND),
            (LearnError::FolderNotFound(id), StatusCode::NOT_FOUND),
            (
                LearnError::InvalidFolderParent { folder_id: id },
                StatusCode::BAD_REQUEST,
            ),
            (LearnError::SessionCompleted(id), StatusCode::CONFLICT),
            (
                LearnError::ProgressNotInSession {
                    progress_id: id,
                    session_id: id,
                },
                StatusCode::CONFLICT,
            ),
            (LearnError::EmptyStudySet(id), StatusCode::BAD_REQUEST),
            (LearnError::EmptySelection(id), StatusCode::BAD_REQUEST),
            (LearnError::InvalidMasteryGoal, StatusCode::BAD_REQUEST),
            (
                LearnError::MissingFlashcard { flashcard_id: id },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                LearnError::StoreUnavailable("poisoned".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).into_response().status(), status);
        }
    }

    #[test]
    fn test_error_display_not_found() {
        let error = ApiError::NotFound("Session 123".to_string());
        assert_eq!(error.to_string(), "Not found: Session 123");
    }

    #[test]
    fn test_error_display_conflict() {
        let id = Uuid::nil();
        let error = ApiError::from(LearnError::SessionCompleted(id));
        assert_eq!(
            error.to_string(),
            format!("Conflict: learn session {} is already completed", id)
        );
    }
}

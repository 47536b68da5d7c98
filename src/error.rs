//! Error types for the Librarium server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// One rejected field inside a validation error
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Flatten validator output into field/message pairs, sorted for stable bodies
fn validation_details(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, violations)| {
            violations.iter().map(move |violation| FieldError {
                field: field.to_string(),
                message: violation
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field)),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
    details
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message, details) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, "Unauthorized", msg.clone(), None)
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "NotFound", msg.clone(), None)
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "One or more fields failed validation.".to_string(),
                Some(validation_details(errors)),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BadRequest", msg.clone(), None)
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, "Conflict", msg.clone(), None)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DatabaseError",
                    "Database error".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(range(min = 1, message = "A book reference is required"))]
        book_id: i32,
        #[validate(range(min = 1, message = "A user reference is required"))]
        user_id: i32,
    }

    #[test]
    fn validation_details_lists_every_rejected_field() {
        let err = Probe {
            book_id: 0,
            user_id: -3,
        }
        .validate()
        .unwrap_err();

        let details = validation_details(&err);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].field, "book_id");
        assert_eq!(details[0].message, "A book reference is required");
        assert_eq!(details[1].field, "user_id");
    }

    #[test]
    fn valid_input_produces_no_details() {
        let ok = Probe {
            book_id: 1,
            user_id: 2,
        }
        .validate();
        assert!(ok.is_ok());
    }
}

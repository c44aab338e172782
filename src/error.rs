// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::repositories::RepositoryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// One field-level validation failure. `field` is the camelCase path of the
/// offending value, e.g. `exercises[0].sets[1].reps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Validation failure on a single field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, message)])
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let text = |msg: String| Some(serde_json::Value::String(msg));

        let (status, error, code, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None, None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None, None),
            AppError::Validation(errors) => {
                tracing::warn!(fields = errors.len(), "Validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    "validation_error",
                    None,
                    serde_json::to_value(errors).ok(),
                )
            }
            AppError::Repository(err) => match err {
                RepositoryError::InvalidId { .. } => (
                    StatusCode::BAD_REQUEST,
                    "invalid_id",
                    Some(err.code()),
                    text(err.to_string()),
                ),
                RepositoryError::NotFound { .. } => (
                    StatusCode::NOT_FOUND,
                    "not_found",
                    Some(err.code()),
                    text(err.to_string()),
                ),
                RepositoryError::InUse { .. } => (
                    StatusCode::CONFLICT,
                    "conflict",
                    Some(err.code()),
                    text(err.to_string()),
                ),
                RepositoryError::Persistence { .. } => {
                    tracing::error!(code = %err.code(), error = %err, "Database error");
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None, None)
                }
            },
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None, None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            code,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::Entity;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let (status, body) = render(AppError::invalid_field("name", "Name is required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"][0]["field"], "name");

        let missing = AppError::from(RepositoryError::NotFound {
            entity: Entity::Workout,
            id: "w".to_string(),
        });
        let (status, body) = render(missing).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "WORKOUT_NOT_FOUND");

        let in_use = AppError::from(RepositoryError::InUse {
            entity: Entity::Exercise,
            id: "e".to_string(),
        });
        let (status, body) = render(in_use).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");

        let (status, _) = render(AppError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = render(AppError::Internal(anyhow::anyhow!("disk on fire"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": "internal_error"}));
    }
}

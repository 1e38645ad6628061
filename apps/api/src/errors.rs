use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Extraction failures are not represented here: they degrade to empty text
/// inside the extractor and never reach a handler as an error.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// No trained classifier artifact was loaded at startup.
    #[error("classifier unavailable")]
    ClassifierUnavailable,

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Rendering error: {0}")]
    Rendering(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MalformedInput(msg) => {
                (StatusCode::BAD_REQUEST, "MALFORMED_INPUT", msg.clone())
            }
            AppError::ClassifierUnavailable => (
                StatusCode::BAD_REQUEST,
                "CLASSIFIER_UNAVAILABLE",
                "classifier unavailable".to_string(),
            ),
            AppError::Embedding(msg) => {
                tracing::error!("Embedding error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EMBEDDING_ERROR",
                    "Failed to embed the supplied text".to_string(),
                )
            }
            AppError::Rendering(msg) => {
                tracing::error!("Rendering error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDERING_ERROR",
                    format!("Failed to build the resume document: {msg}"),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifier_unavailable_is_bad_request() {
        let response = AppError::ClassifierUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rendering_error_is_internal() {
        let response = AppError::Rendering("no pages".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            AppError::ClassifierUnavailable.to_string(),
            "classifier unavailable"
        );
        assert_eq!(
            AppError::Validation("text is empty".to_string()).to_string(),
            "Validation error: text is empty"
        );
    }
}

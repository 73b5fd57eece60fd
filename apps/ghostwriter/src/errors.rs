use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("Text extraction failed: {0}")]
    Extraction(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnsupportedFile(ext) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FILE",
                format!("Files of type '{ext}' are not supported (use .txt, .md, .docx or .pdf)"),
            ),
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_ERROR",
                msg.clone(),
            ),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "The drafting service failed to respond".to_string(),
                )
            }
            AppError::NotConfigured(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "NOT_CONFIGURED",
                msg.clone(),
            ),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
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

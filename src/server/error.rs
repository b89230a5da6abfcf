use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::encoding::EncodeError;
use crate::output::OutputError;

/// Request-level error. Handlers return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Classify a pipeline failure: bad input is the client's fault,
    /// everything else is ours.
    pub fn from_pipeline(err: anyhow::Error) -> Self {
        if let Some(encode) = err.downcast_ref::<EncodeError>() {
            return AppError::Validation(encode.to_string());
        }
        if let Some(OutputError::NotFound(name)) = err.downcast_ref::<OutputError>() {
            return AppError::NotFound(name.clone());
        }
        AppError::Internal(err)
    }
}

impl From<OutputError> for AppError {
    fn from(err: OutputError) -> Self {
        match err {
            OutputError::NotFound(name) => AppError::NotFound(name),
            OutputError::InvalidName(name) => {
                AppError::Validation(format!("invalid file name {name:?}"))
            }
            other => AppError::Internal(other.into()),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(anyhow::anyhow!("worker task failed: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
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

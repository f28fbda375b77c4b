use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use khi_core::DealError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    NotFoundError(String),
    /// `message` goes to the client; `cause` only to the logs.
    #[error("{message}: {cause}")]
    InternalServerError {
        message: &'static str,
        cause: anyhow::Error,
    },
}

impl AppError {
    pub fn internal(message: &'static str, cause: impl Into<anyhow::Error>) -> Self {
        Self::InternalServerError {
            message,
            cause: cause.into(),
        }
    }

    /// Maps a store error, using `message` if it turns out to be a 500.
    pub fn from_deal(err: DealError, message: &'static str) -> Self {
        match err {
            DealError::Validation(msg) => Self::ValidationError(msg),
            DealError::NotFound(msg) => Self::NotFoundError(msg),
            other => Self::internal(message, other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError { message, cause } => {
                tracing::error!("Internal Server Error: {}: {:#}", message, cause);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Payload too large")]
    PayloadTooLarge,
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
    #[error("Internal server error")]
    Internal,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidInput(msg) => {
                tracing::debug!(message = %msg, "Invalid input");
                (StatusCode::BAD_REQUEST, msg)
            }
            Self::PayloadTooLarge => {
                tracing::debug!("Request body exceeds limit");
                (StatusCode::PAYLOAD_TOO_LARGE, "Message body is too large".to_string())
            }
            Self::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Store unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            Self::Internal => {
                tracing::error!("Internal server error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

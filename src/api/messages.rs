use crate::api::AppState;
use crate::api::schemas::messages::CreateMessageRequest;
use crate::domain::message::{INVALID_TEXT_MESSAGE, Message};
use crate::error::{AppError, Result};
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::IntoResponse,
};

/// Lists the whole board, oldest first.
///
/// # Errors
/// Returns `AppError::StoreUnavailable` if the database cannot be read.
pub async fn list_messages(State(state): State<AppState>) -> Result<Json<Vec<Message>>> {
    let messages = state.message_service.list_all().await?;
    Ok(Json(messages))
}

/// Appends a message and echoes the stored row.
///
/// # Errors
/// Returns `AppError::PayloadTooLarge` if the body exceeds the request size limit.
/// Returns `AppError::InvalidInput` if the body is not JSON or its `text` is missing or blank.
/// Returns `AppError::StoreUnavailable` if the message cannot be stored.
pub async fn create_message(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse> {
    let body = body.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Unreadable message body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::InvalidInput(INVALID_TEXT_MESSAGE.to_string())
        }
    })?;

    let request: CreateMessageRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Malformed message body");
        AppError::InvalidInput(INVALID_TEXT_MESSAGE.to_string())
    })?;

    let message = state.message_service.append(request.text()).await?;
    tracing::info!(message_id = message.id, "Message created");

    Ok((StatusCode::CREATED, Json(message)))
}

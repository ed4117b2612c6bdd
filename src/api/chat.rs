use axum::{
    body::Bytes,
    extract::State,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::Identity;
use crate::api::state::AppState;
use crate::db::{MessageRepository, MessageView};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub status: String,
    pub messages: Vec<MessageView>,
}

/// POST /send_message (requires auth)
///
/// The body is parsed by hand so that a missing or malformed payload is
/// reported as missing content rather than an extractor rejection.
pub async fn send_message(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    body: Bytes,
) -> Result<Json<SendMessageResponse>, AppError> {
    let content = serde_json::from_slice::<SendMessageRequest>(&body)
        .ok()
        .and_then(|req| req.content)
        .ok_or(AppError::EmptyContent)?;

    let id = MessageRepository::append(&state.db, identity.user_id, &content).await?;
    tracing::debug!("User {} posted message {}", identity.user_id, id);

    Ok(Json(SendMessageResponse {
        status: "success".to_string(),
    }))
}

/// GET /get_messages (requires auth)
pub async fn get_messages(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<MessagesResponse>, AppError> {
    let messages = MessageRepository::list_all(&state.db)
        .await?
        .into_iter()
        .map(|m| m.view_for(identity.user_id))
        .collect();

    Ok(Json(MessagesResponse {
        status: "success".to_string(),
        messages,
    }))
}

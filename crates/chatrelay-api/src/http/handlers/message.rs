//! Message relay HTTP handler.
//!
//! Endpoints:
//! - POST /api/chat/message - Send a user message and receive the bot reply

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use chatrelay_types::chat::ChatMessage;
use chatrelay_types::error::ChatError;

use crate::http::error::AppError;
use crate::http::extractors::ValidatedJson;
use crate::state::AppState;

/// Request body for sending a message. The text may be empty.
#[derive(Debug, Deserialize, Validate)]
pub struct ChatMessageSend {
    pub session_id: String,
    pub message: String,
}

/// POST /api/chat/message - Store the message, relay it, return the bot reply.
pub async fn send_message(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ChatMessageSend>,
) -> Result<Json<ChatMessage>, AppError> {
    let session_id: Uuid = body
        .session_id
        .parse()
        .map_err(|_| ChatError::SessionNotFound(body.session_id.clone()))?;

    let reply = state
        .chat_service
        .send_message(&session_id, body.message)
        .await?;
    Ok(Json(reply))
}

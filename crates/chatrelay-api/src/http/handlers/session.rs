//! Chat session HTTP handlers.
//!
//! Endpoints:
//! - POST /api/chat/session                - Open a chat session
//! - GET  /api/chat/messages/{session_id}  - List a session's messages

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use chatrelay_types::chat::{ChatMessage, ChatSession};

use crate::http::error::AppError;
use crate::http::extractors::ValidatedJson;
use crate::state::AppState;

/// Request body for opening a session.
#[derive(Debug, Deserialize, Validate)]
pub struct ChatSessionCreate {
    pub user_name: String,
    #[validate(email)]
    pub user_email: String,
}

/// POST /api/chat/session - Open a new chat session.
pub async fn create_session(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ChatSessionCreate>,
) -> Result<Json<ChatSession>, AppError> {
    let session = state
        .chat_service
        .create_session(body.user_name, body.user_email)
        .await?;
    Ok(Json(session))
}

/// GET /api/chat/messages/{session_id} - Messages in chronological order.
///
/// An id that is not a UUID cannot name a session, so it lists nothing.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let Ok(session_id) = session_id.parse::<Uuid>() else {
        return Ok(Json(Vec::new()));
    };
    let messages = state.chat_service.get_messages(&session_id).await?;
    Ok(Json(messages))
}

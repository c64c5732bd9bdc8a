//! Webhook configuration HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/chat/config - Current webhook URL (or null)
//! - PUT    /api/chat/config - Replace the webhook URL
//! - DELETE /api/chat/config - Remove the webhook configuration

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use validator::Validate;

use chatrelay_types::chat::WebhookConfig;

use crate::http::error::AppError;
use crate::http::extractors::ValidatedJson;
use crate::state::AppState;

/// Request body for replacing the webhook configuration.
#[derive(Debug, Deserialize, Validate)]
pub struct WebhookConfigUpdate {
    pub webhook_url: String,
}

/// Confirmation returned by configuration writes.
#[derive(Debug, Serialize)]
pub struct ConfigChanged {
    pub message: &'static str,
    pub webhook_url: Option<String>,
}

/// GET /api/chat/config - Current webhook configuration.
pub async fn get_config(State(state): State<AppState>) -> Result<Json<WebhookConfig>, AppError> {
    Ok(Json(state.chat_service.get_config().await?))
}

/// PUT /api/chat/config - Replace the webhook URL.
pub async fn update_config(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<WebhookConfigUpdate>,
) -> Result<Json<ConfigChanged>, AppError> {
    let config = state.chat_service.set_config(body.webhook_url).await?;
    Ok(Json(ConfigChanged {
        message: "Configuration updated successfully",
        webhook_url: config.webhook_url,
    }))
}

/// DELETE /api/chat/config - Return to the unconfigured state.
pub async fn clear_config(State(state): State<AppState>) -> Result<Json<ConfigChanged>, AppError> {
    state.chat_service.clear_config().await?;
    Ok(Json(ConfigChanged {
        message: "Configuration cleared successfully",
        webhook_url: None,
    }))
}

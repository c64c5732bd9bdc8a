//! Webhook relay payload and outcome types.
//!
//! The relay forwards a user's message to the configured workflow endpoint
//! and turns whatever happens into the text of a bot message. These types
//! make the possible results explicit instead of probing loosely-typed JSON.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RelayError;

/// Bot reply used when no webhook URL has been configured.
pub const NOT_CONFIGURED_REPLY: &str = "The chatbot is not fully configured yet. Please contact the administrator to set up the n8n webhook URL.";

/// Bot reply used when the webhook call fails for any reason.
pub const RELAY_FAILURE_REPLY: &str = "I apologize, but I'm having trouble processing your request right now. Please try again later.";

/// JSON body POSTed to the webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub session_id: String,
    pub user_name: String,
    pub user_email: String,
    pub message: String,
    /// ISO-8601 UTC time the relay was invoked.
    pub timestamp: String,
}

impl WebhookPayload {
    pub fn new(
        session_id: &Uuid,
        user_name: &str,
        user_email: &str,
        message: &str,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id: session_id.to_string(),
            user_name: user_name.to_string(),
            user_email: user_email.to_string(),
            message: message.to_string(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

/// Reply text extracted from a successful webhook response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteReply {
    /// Taken from the `response` or `message` field.
    Text(String),
    /// Neither field was usable; the whole body, serialized.
    Raw(String),
}

impl RemoteReply {
    pub fn into_text(self) -> String {
        match self {
            RemoteReply::Text(text) | RemoteReply::Raw(text) => text,
        }
    }
}

/// Result of one relay invocation.
#[derive(Debug)]
pub enum RelayOutcome {
    Replied(RemoteReply),
    NotConfigured,
    Failed(RelayError),
}

impl RelayOutcome {
    /// The text stored as the bot's message.
    pub fn into_reply_text(self) -> String {
        match self {
            RelayOutcome::Replied(reply) => reply.into_text(),
            RelayOutcome::NotConfigured => NOT_CONFIGURED_REPLY.to_string(),
            RelayOutcome::Failed(_) => RELAY_FAILURE_REPLY.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RelayOutcome::Failed(_))
    }
}

//! Chat session, message, and webhook configuration types.
//!
//! A session ties a sequence of messages to one named, emailed user.
//! Messages are written once (one for the user's text, one for the bot's
//! reply) and never modified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Who authored a chat message.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (sender IN ('user', 'bot'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A chat session opened by a user.
///
/// Created once per user-initiated chat and immutable afterwards.
/// Several sessions may share the same email address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Build a fresh session with a new id and the current time.
    pub fn new(user_name: impl Into<String>, user_email: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_name: user_name.into(),
            user_email: user_email.into(),
            created_at: Utc::now(),
        }
    }
}

/// A single message within a chat session.
///
/// Messages are ordered by `timestamp` within a session; ties keep
/// insertion order. The text may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub message: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a message stamped with a new id and the current time.
    pub fn new(session_id: Uuid, sender: Sender, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            session_id,
            message: message.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// The webhook configuration singleton.
///
/// At most one record exists; writes replace it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub webhook_url: Option<String>,
}

impl WebhookConfig {
    /// The URL to relay to, if one is set and not blank.
    pub fn active_url(&self) -> Option<&str> {
        self.webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

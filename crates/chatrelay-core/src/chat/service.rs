//! Chat service orchestrating sessions, message persistence, and the relay.
//!
//! ChatService coordinates the ChatRepository, the WebhookConfigRepository,
//! and the WebhookRelay: a user message is stored, relayed, and answered by
//! a stored bot message.

use chatrelay_types::chat::{ChatMessage, ChatSession, Sender, WebhookConfig};
use chatrelay_types::error::{ChatError, RepositoryError};
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::relay::{WebhookRelay, WebhookTransport};
use crate::repository::MAX_LIST_LIMIT;
use crate::repository::webhook_config::WebhookConfigRepository;

/// Orchestrates chat sessions and the message relay.
///
/// Generic over its repositories and the relay transport to maintain clean
/// architecture (chatrelay-core never depends on chatrelay-infra).
pub struct ChatService<C: ChatRepository, W: WebhookConfigRepository, T: WebhookTransport> {
    chat_repo: C,
    config_repo: W,
    relay: WebhookRelay<T>,
}

impl<C, W, T> ChatService<C, W, T>
where
    C: ChatRepository,
    W: WebhookConfigRepository,
    T: WebhookTransport,
{
    pub fn new(chat_repo: C, config_repo: W, relay: WebhookRelay<T>) -> Self {
        Self {
            chat_repo,
            config_repo,
            relay,
        }
    }

    // --- Sessions ---

    /// Open a new chat session. Email uniqueness is not enforced.
    pub async fn create_session(
        &self,
        user_name: String,
        user_email: String,
    ) -> Result<ChatSession, RepositoryError> {
        let session = ChatSession::new(user_name, user_email);
        let session = self.chat_repo.create_session(&session).await?;
        info!(session_id = %session.id, user_email = %session.user_email, "Chat session created");
        Ok(session)
    }

    pub async fn get_session(
        &self,
        session_id: &Uuid,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        self.chat_repo.get_session(session_id).await
    }

    // --- Messages ---

    /// Store a user message, relay it, and store the bot's reply.
    ///
    /// Returns the bot message. An unknown session fails with
    /// [`ChatError::SessionNotFound`] before anything is written. Relay
    /// failures never surface here; they become the apology reply. A store
    /// failure after the user message was written leaves that message in
    /// place.
    pub async fn send_message(
        &self,
        session_id: &Uuid,
        text: String,
    ) -> Result<ChatMessage, ChatError> {
        let Some(session) = self.chat_repo.get_session(session_id).await? else {
            warn!(session_id = %session_id, "Message sent to unknown session");
            return Err(ChatError::session_not_found(session_id));
        };

        let user_message = ChatMessage::new(session.id, Sender::User, text);
        self.chat_repo.save_message(&user_message).await?;

        let config = self.config_repo.get_webhook_config().await?.unwrap_or_default();
        let outcome = self
            .relay
            .relay(&config, &session, &user_message.message)
            .await;

        let bot_message = ChatMessage::new(session.id, Sender::Bot, outcome.into_reply_text());
        self.chat_repo.save_message(&bot_message).await?;

        Ok(bot_message)
    }

    /// All messages of a session in chronological order, capped at
    /// [`MAX_LIST_LIMIT`]. Unknown sessions yield an empty list.
    pub async fn get_messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        self.chat_repo
            .get_messages(session_id, Some(MAX_LIST_LIMIT))
            .await
    }

    // --- Webhook configuration ---

    /// The current webhook configuration; an empty one when never set.
    pub async fn get_config(&self) -> Result<WebhookConfig, RepositoryError> {
        Ok(self
            .config_repo
            .get_webhook_config()
            .await?
            .unwrap_or_default())
    }

    /// Replace the webhook configuration with `webhook_url`.
    pub async fn set_config(&self, webhook_url: String) -> Result<WebhookConfig, RepositoryError> {
        let config = WebhookConfig {
            webhook_url: Some(webhook_url),
        };
        self.config_repo.set_webhook_config(&config).await?;
        info!(webhook_url = config.webhook_url.as_deref(), "Webhook configuration updated");
        Ok(config)
    }

    /// Remove the webhook configuration. Returns whether one existed.
    pub async fn clear_config(&self) -> Result<bool, RepositoryError> {
        let removed = self.config_repo.clear_webhook_config().await?;
        info!(removed, "Webhook configuration cleared");
        Ok(removed > 0)
    }
}

//! In-memory implementation of every repository port.
//!
//! Uses `HashMap` and `Vec` behind `std::sync::RwLock`. Cloning an
//! `InMemoryStore` yields another handle to the same data, so one store can
//! back several services. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chatrelay_types::chat::{ChatMessage, ChatSession, WebhookConfig};
use chatrelay_types::error::RepositoryError;
use chatrelay_types::status::StatusCheck;
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::repository::status::StatusRepository;
use crate::repository::webhook_config::WebhookConfigRepository;

#[derive(Default)]
struct Collections {
    sessions: RwLock<HashMap<Uuid, ChatSession>>,
    messages: RwLock<Vec<ChatMessage>>,
    status_checks: RwLock<Vec<StatusCheck>>,
    webhook_config: RwLock<Option<WebhookConfig>>,
}

/// In-memory store for tests and `store = "memory"` deployments.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, RepositoryError> {
    lock.read()
        .map_err(|_| RepositoryError::Query("in-memory store lock poisoned".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, RepositoryError> {
    lock.write()
        .map_err(|_| RepositoryError::Query("in-memory store lock poisoned".to_string()))
}

fn take_limit<T>(items: impl Iterator<Item = T>, limit: Option<i64>) -> Vec<T> {
    match limit {
        Some(limit) => items.take(limit.max(0) as usize).collect(),
        None => items.collect(),
    }
}

impl ChatRepository for InMemoryStore {
    async fn create_session(&self, session: &ChatSession) -> Result<ChatSession, RepositoryError> {
        let mut sessions = write(&self.inner.sessions)?;
        if sessions.contains_key(&session.id) {
            return Err(RepositoryError::Conflict(format!(
                "session {} already exists",
                session.id
            )));
        }
        sessions.insert(session.id, session.clone());
        Ok(session.clone())
    }

    async fn get_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, RepositoryError> {
        Ok(read(&self.inner.sessions)?.get(session_id).cloned())
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        write(&self.inner.messages)?.push(message.clone());
        Ok(())
    }

    async fn get_messages(
        &self,
        session_id: &Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let mut matching: Vec<ChatMessage> = read(&self.inner.messages)?
            .iter()
            .filter(|m| &m.session_id == session_id)
            .cloned()
            .collect();
        // Stable sort: equal timestamps keep insertion order.
        matching.sort_by_key(|m| m.timestamp);
        Ok(take_limit(matching.into_iter(), limit))
    }
}

impl StatusRepository for InMemoryStore {
    async fn create_status_check(&self, check: &StatusCheck) -> Result<(), RepositoryError> {
        write(&self.inner.status_checks)?.push(check.clone());
        Ok(())
    }

    async fn list_status_checks(&self, limit: Option<i64>) -> Result<Vec<StatusCheck>, RepositoryError> {
        let checks = read(&self.inner.status_checks)?;
        Ok(take_limit(checks.iter().cloned(), limit))
    }
}

impl WebhookConfigRepository for InMemoryStore {
    async fn get_webhook_config(&self) -> Result<Option<WebhookConfig>, RepositoryError> {
        Ok(read(&self.inner.webhook_config)?.clone())
    }

    async fn set_webhook_config(&self, config: &WebhookConfig) -> Result<(), RepositoryError> {
        *write(&self.inner.webhook_config)? = Some(config.clone());
        Ok(())
    }

    async fn clear_webhook_config(&self) -> Result<u64, RepositoryError> {
        let removed = write(&self.inner.webhook_config)?.take();
        Ok(u64::from(removed.is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatrelay_types::chat::Sender;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn test_create_and_get_session() {
        let store = InMemoryStore::new();
        let session = ChatSession::new("Ada", "ada@example.com");
        store.create_session(&session).await.unwrap();

        let found = store.get_session(&session.id).await.unwrap().unwrap();
        assert_eq!(found, session);
        assert!(store.get_session(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_session_id_conflicts() {
        let store = InMemoryStore::new();
        let session = ChatSession::new("Ada", "ada@example.com");
        store.create_session(&session).await.unwrap();
        let err = store.create_session(&session).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_messages_sorted_with_insertion_tiebreak() {
        let store = InMemoryStore::new();
        let session_id = Uuid::now_v7();
        let base = Utc::now();

        let mut later = ChatMessage::new(session_id, Sender::Bot, "later");
        later.timestamp = base + Duration::seconds(5);
        let mut first_tie = ChatMessage::new(session_id, Sender::User, "tie-1");
        first_tie.timestamp = base;
        let mut second_tie = ChatMessage::new(session_id, Sender::Bot, "tie-2");
        second_tie.timestamp = base;
        let other = ChatMessage::new(Uuid::now_v7(), Sender::User, "elsewhere");

        for m in [&later, &first_tie, &second_tie, &other] {
            store.save_message(m).await.unwrap();
        }

        let messages = store.get_messages(&session_id, None).await.unwrap();
        let texts: Vec<&str> = messages.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, ["tie-1", "tie-2", "later"]);

        let limited = store.get_messages(&session_id, Some(2)).await.unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = InMemoryStore::new();
        let handle = store.clone();
        handle
            .create_status_check(&StatusCheck::new("uptime-monitor"))
            .await
            .unwrap();
        assert_eq!(store.list_status_checks(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_webhook_config_replace_and_clear() {
        let store = InMemoryStore::new();
        assert!(store.get_webhook_config().await.unwrap().is_none());

        for url in ["https://a.example/hook", "https://b.example/hook"] {
            store
                .set_webhook_config(&WebhookConfig {
                    webhook_url: Some(url.to_string()),
                })
                .await
                .unwrap();
        }
        let current = store.get_webhook_config().await.unwrap().unwrap();
        assert_eq!(current.webhook_url.as_deref(), Some("https://b.example/hook"));

        assert_eq!(store.clear_webhook_config().await.unwrap(), 1);
        assert_eq!(store.clear_webhook_config().await.unwrap(), 0);
        assert!(store.get_webhook_config().await.unwrap().is_none());
    }
}

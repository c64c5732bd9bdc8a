//! Runtime-selected store backend.
//!
//! `StoreBackend` picks SQLite or the in-memory store from configuration
//! and implements every repository port by delegation, so the API layer
//! wires one concrete type regardless of the choice.

use chatrelay_core::chat::repository::ChatRepository;
use chatrelay_core::repository::memory::InMemoryStore;
use chatrelay_core::repository::status::StatusRepository;
use chatrelay_core::repository::webhook_config::WebhookConfigRepository;
use chatrelay_types::chat::{ChatMessage, ChatSession, WebhookConfig};
use chatrelay_types::config::{ServerConfig, StoreKind};
use chatrelay_types::error::RepositoryError;
use chatrelay_types::status::StatusCheck;
use tracing::info;
use uuid::Uuid;

use crate::sqlite::chat::SqliteChatRepository;
use crate::sqlite::pool::DatabasePool;
use crate::sqlite::status::SqliteStatusRepository;
use crate::sqlite::webhook_config::SqliteWebhookConfigRepository;

/// Errors raised while opening a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to create data directory {path}: {source}")]
    DataDir {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to open database: {0}")]
    Open(#[from] sqlx::Error),
}

/// The SQLite repositories sharing one pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: DatabasePool,
    chat: SqliteChatRepository,
    status: SqliteStatusRepository,
    webhook_config: SqliteWebhookConfigRepository,
}

impl SqliteStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            chat: SqliteChatRepository::new(pool.clone()),
            status: SqliteStatusRepository::new(pool.clone()),
            webhook_config: SqliteWebhookConfigRepository::new(pool.clone()),
            pool,
        }
    }
}

#[derive(Clone)]
pub enum StoreBackend {
    Sqlite(SqliteStore),
    Memory(InMemoryStore),
}

impl StoreBackend {
    /// Open the store named by `config.store`.
    ///
    /// For SQLite with a derived URL, `data_dir` is created first.
    pub async fn open(config: &ServerConfig) -> Result<Self, StoreError> {
        match config.store {
            StoreKind::Memory => {
                info!("Using in-memory store; data is lost on restart");
                Ok(Self::Memory(InMemoryStore::new()))
            }
            StoreKind::Sqlite => {
                if config.database_url.is_none() {
                    tokio::fs::create_dir_all(&config.data_dir)
                        .await
                        .map_err(|source| StoreError::DataDir {
                            path: config.data_dir.display().to_string(),
                            source,
                        })?;
                }
                let url = config.resolved_database_url();
                let pool = DatabasePool::new(&url).await?;
                info!(database_url = %url, "Using SQLite store");
                Ok(Self::Sqlite(SqliteStore::new(pool)))
            }
        }
    }

    pub fn kind(&self) -> StoreKind {
        match self {
            Self::Sqlite(_) => StoreKind::Sqlite,
            Self::Memory(_) => StoreKind::Memory,
        }
    }

    /// Release pooled connections. No-op for the in-memory store.
    pub async fn close(&self) {
        if let Self::Sqlite(store) = self {
            store.pool.close().await;
        }
    }
}

impl ChatRepository for StoreBackend {
    async fn create_session(&self, session: &ChatSession) -> Result<ChatSession, RepositoryError> {
        match self {
            Self::Sqlite(s) => s.chat.create_session(session).await,
            Self::Memory(m) => m.create_session(session).await,
        }
    }

    async fn get_session(&self, session_id: &Uuid) -> Result<Option<ChatSession>, RepositoryError> {
        match self {
            Self::Sqlite(s) => s.chat.get_session(session_id).await,
            Self::Memory(m) => m.get_session(session_id).await,
        }
    }

    async fn save_message(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        match self {
            Self::Sqlite(s) => s.chat.save_message(message).await,
            Self::Memory(m) => m.save_message(message).await,
        }
    }

    async fn get_messages(
        &self,
        session_id: &Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        match self {
            Self::Sqlite(s) => s.chat.get_messages(session_id, limit).await,
            Self::Memory(m) => m.get_messages(session_id, limit).await,
        }
    }
}

impl StatusRepository for StoreBackend {
    async fn create_status_check(&self, check: &StatusCheck) -> Result<(), RepositoryError> {
        match self {
            Self::Sqlite(s) => s.status.create_status_check(check).await,
            Self::Memory(m) => m.create_status_check(check).await,
        }
    }

    async fn list_status_checks(&self, limit: Option<i64>) -> Result<Vec<StatusCheck>, RepositoryError> {
        match self {
            Self::Sqlite(s) => s.status.list_status_checks(limit).await,
            Self::Memory(m) => m.list_status_checks(limit).await,
        }
    }
}

impl WebhookConfigRepository for StoreBackend {
    async fn get_webhook_config(&self) -> Result<Option<WebhookConfig>, RepositoryError> {
        match self {
            Self::Sqlite(s) => s.webhook_config.get_webhook_config().await,
            Self::Memory(m) => m.get_webhook_config().await,
        }
    }

    async fn set_webhook_config(&self, config: &WebhookConfig) -> Result<(), RepositoryError> {
        match self {
            Self::Sqlite(s) => s.webhook_config.set_webhook_config(config).await,
            Self::Memory(m) => m.set_webhook_config(config).await,
        }
    }

    async fn clear_webhook_config(&self) -> Result<u64, RepositoryError> {
        match self {
            Self::Sqlite(s) => s.webhook_config.clear_webhook_config().await,
            Self::Memory(m) => m.clear_webhook_config().await,
        }
    }
}

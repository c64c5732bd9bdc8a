//! SQLite webhook configuration repository.
//!
//! The configuration is a singleton row pinned to `id = 1`; writes use
//! `INSERT ... ON CONFLICT DO UPDATE` so there is never a moment with no row.

use chatrelay_core::repository::webhook_config::WebhookConfigRepository;
use chatrelay_types::chat::WebhookConfig;
use chatrelay_types::error::RepositoryError;
use chrono::Utc;
use sqlx::Row;

use super::format_datetime;
use super::pool::DatabasePool;

/// SQLite-backed implementation of `WebhookConfigRepository`.
#[derive(Clone)]
pub struct SqliteWebhookConfigRepository {
    pool: DatabasePool,
}

impl SqliteWebhookConfigRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl WebhookConfigRepository for SqliteWebhookConfigRepository {
    async fn get_webhook_config(&self) -> Result<Option<WebhookConfig>, RepositoryError> {
        let row = sqlx::query("SELECT webhook_url FROM n8n_config WHERE id = 1")
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let webhook_url: Option<String> = row
                    .try_get("webhook_url")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(WebhookConfig { webhook_url }))
            }
            None => Ok(None),
        }
    }

    async fn set_webhook_config(&self, config: &WebhookConfig) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"INSERT INTO n8n_config (id, webhook_url, updated_at)
               VALUES (1, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                   webhook_url = excluded.webhook_url,
                   updated_at = excluded.updated_at"#,
        )
        .bind(&config.webhook_url)
        .bind(format_datetime(&Utc::now()))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn clear_webhook_config(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM n8n_config")
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

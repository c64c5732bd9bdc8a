//! SQLite status check repository implementation.

use chatrelay_core::repository::status::StatusRepository;
use chatrelay_types::error::RepositoryError;
use chatrelay_types::status::StatusCheck;
use sqlx::Row;

use super::pool::DatabasePool;
use super::{format_datetime, limit_or_all, parse_datetime, parse_uuid};

/// SQLite-backed implementation of `StatusRepository`.
#[derive(Clone)]
pub struct SqliteStatusRepository {
    pool: DatabasePool,
}

impl SqliteStatusRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

struct StatusCheckRow {
    id: String,
    client_name: String,
    timestamp: String,
}

impl StatusCheckRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            client_name: row.try_get("client_name")?,
            timestamp: row.try_get("timestamp")?,
        })
    }

    fn into_check(self) -> Result<StatusCheck, RepositoryError> {
        Ok(StatusCheck {
            id: parse_uuid(&self.id, "status check id")?,
            client_name: self.client_name,
            timestamp: parse_datetime(&self.timestamp)?,
        })
    }
}

impl StatusRepository for SqliteStatusRepository {
    async fn create_status_check(&self, check: &StatusCheck) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO status_checks (id, client_name, timestamp) VALUES (?, ?, ?)")
            .bind(check.id.to_string())
            .bind(&check.client_name)
            .bind(format_datetime(&check.timestamp))
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_status_checks(&self, limit: Option<i64>) -> Result<Vec<StatusCheck>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM status_checks ORDER BY timestamp ASC, rowid ASC LIMIT ?")
            .bind(limit_or_all(limit))
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                StatusCheckRow::from_row(row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?
                    .into_check()
            })
            .collect()
    }
}

//! Status check records.
//!
//! A status check is a client ping persisted for diagnostics. It has no
//! relationship to chat entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

use thiserror::Error;
use uuid::Uuid;

/// Errors from repository operations (used by trait definitions in chatrelay-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors surfaced by the chat service.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat session not found: {0}")]
    SessionNotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Why a webhook relay attempt failed.
///
/// Never shown to chat users; the relay downgrades every variant to the
/// same apology text.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("webhook request timed out after {0}s")]
    Timeout(u64),

    #[error("webhook returned HTTP {0}")]
    Status(u16),

    #[error("webhook request failed: {0}")]
    Transport(String),

    #[error("webhook response is malformed: {0}")]
    MalformedBody(String),
}

/// Errors raised while loading server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse config file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ChatError {
    pub fn session_not_found(id: &Uuid) -> Self {
        ChatError::SessionNotFound(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_chat_error_from_repository() {
        let err: ChatError = RepositoryError::Conflict("duplicate id".to_string()).into();
        assert!(matches!(err, ChatError::Storage(RepositoryError::Conflict(_))));
        assert_eq!(err.to_string(), "storage error: conflict: duplicate id");
    }

    #[test]
    fn test_relay_error_display() {
        assert_eq!(RelayError::Status(502).to_string(), "webhook returned HTTP 502");
        assert_eq!(
            RelayError::Timeout(30).to_string(),
            "webhook request timed out after 30s"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            field: "port",
            reason: "must be > 0".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for port: must be > 0");
    }
}

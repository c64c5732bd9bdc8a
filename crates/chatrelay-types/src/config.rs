//! Server configuration types for chatrelay.
//!
//! `ServerConfig` represents `chatrelay.toml` plus the environment overrides
//! applied on top of it at startup. All fields have sensible defaults.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    Sqlite,
    Memory,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Sqlite => write!(f, "sqlite"),
            StoreKind::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StoreKind::Sqlite),
            "memory" => Ok(StoreKind::Memory),
            other => Err(format!("unknown store '{other}', expected sqlite or memory")),
        }
    }
}

/// Top-level configuration for the chatrelay server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub store: StoreKind,

    /// Explicit store connection string. Derived from `data_dir` and
    /// `db_name` when absent.
    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_db_name")]
    pub db_name: String,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Allowed cross-origin request origins. `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Total timeout for one outbound webhook call.
    #[serde(default = "default_webhook_timeout_secs")]
    pub webhook_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_db_name() -> String {
    "chatrelay".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_webhook_timeout_secs() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            store: StoreKind::default(),
            database_url: None,
            db_name: default_db_name(),
            data_dir: default_data_dir(),
            cors_origins: default_cors_origins(),
            webhook_timeout_secs: default_webhook_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// The SQLite connection string to open.
    pub fn resolved_database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!(
                "sqlite://{}?mode=rwc",
                self.data_dir.join(format!("{}.db", self.db_name)).display()
            ),
        }
    }

    /// Address to bind the HTTP listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o.trim() == "*")
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8001);
        assert_eq!(config.store, StoreKind::Sqlite);
        assert_eq!(config.webhook_timeout_secs, 30);
        assert!(config.allows_any_origin());
    }

    #[test]
    fn test_server_config_deserialize_with_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.db_name, "chatrelay");
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_server_config_deserialize_with_values() {
        let toml_str = r#"
host = "127.0.0.1"
port = 9000
store = "memory"
db_name = "catering"
cors_origins = ["https://example.com", "http://localhost:3000"]
webhook_timeout_secs = 10
"#;
        let config: ServerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.cors_origins.len(), 2);
        assert!(!config.allows_any_origin());
        assert_eq!(config.webhook_timeout_secs, 10);
    }

    #[test]
    fn test_resolved_database_url() {
        let mut config = ServerConfig {
            data_dir: PathBuf::from("/var/lib/chatrelay"),
            db_name: "catering".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(
            config.resolved_database_url(),
            "sqlite:///var/lib/chatrelay/catering.db?mode=rwc"
        );

        config.database_url = Some("sqlite::memory:".to_string());
        assert_eq!(config.resolved_database_url(), "sqlite::memory:");
    }

    #[test]
    fn test_store_kind_parse() {
        assert_eq!("SQLite".parse::<StoreKind>().unwrap(), StoreKind::Sqlite);
        assert_eq!(" memory ".parse::<StoreKind>().unwrap(), StoreKind::Memory);
        assert!("mongo".parse::<StoreKind>().is_err());
    }

    #[test]
    fn test_parse_origin_list() {
        assert_eq!(
            parse_origin_list("https://a.com, https://b.com,,"),
            vec!["https://a.com".to_string(), "https://b.com".to_string()]
        );
        assert!(parse_origin_list(" , ").is_empty());
    }
}

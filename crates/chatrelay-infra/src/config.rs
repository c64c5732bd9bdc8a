//! Server configuration loader for chatrelay.
//!
//! Reads `chatrelay.toml` (or the file given with `--config`) into
//! [`ServerConfig`], then layers environment overrides on top and validates
//! the result. A missing file means defaults; a malformed one is an error.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chatrelay_types::config::{ServerConfig, StoreKind, parse_origin_list};
use chatrelay_types::error::ConfigError;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "chatrelay.toml";

/// Load configuration from the TOML file at `path`.
///
/// - If the file does not exist, returns [`ServerConfig::default()`].
/// - If the file cannot be read or parsed, returns an error.
pub async fn load_config_file(path: &Path) -> Result<ServerConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file found at {}, using defaults", path.display());
            return Ok(ServerConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                reason: err.to_string(),
            });
        }
    };

    toml::from_str::<ServerConfig>(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        reason: err.to_string(),
    })
}

/// Apply environment overrides, reading variables through `lookup`
/// (`|k| std::env::var(k).ok()` outside tests).
pub fn apply_env_overrides<F>(config: &mut ServerConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("CHATRELAY_HOST") {
        config.host = host;
    }
    if let Some(port) = lookup("CHATRELAY_PORT") {
        config.port = parse_field("CHATRELAY_PORT", &port)?;
    }
    if let Some(store) = lookup("CHATRELAY_STORE") {
        config.store = StoreKind::from_str(&store).map_err(|reason| ConfigError::Invalid {
            field: "CHATRELAY_STORE",
            reason,
        })?;
    }
    if let Some(url) = lookup("DATABASE_URL") {
        config.database_url = Some(url);
    }
    if let Some(name) = lookup("DB_NAME") {
        config.db_name = name;
    }
    if let Some(dir) = lookup("CHATRELAY_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Some(origins) = lookup("CORS_ORIGINS") {
        config.cors_origins = parse_origin_list(&origins);
    }
    if let Some(timeout) = lookup("WEBHOOK_TIMEOUT_SECS") {
        config.webhook_timeout_secs = parse_field("WEBHOOK_TIMEOUT_SECS", &timeout)?;
    }
    Ok(())
}

fn parse_field<T>(field: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        field,
        reason: format!("'{raw}': {e}"),
    })
}

/// Reject configurations the server cannot start with.
pub fn validate(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.port == 0 {
        return Err(ConfigError::Invalid {
            field: "port",
            reason: "must be greater than 0".to_string(),
        });
    }
    if config.webhook_timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            field: "webhook_timeout_secs",
            reason: "must be greater than 0".to_string(),
        });
    }
    if config.db_name.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field: "db_name",
            reason: "must not be empty".to_string(),
        });
    }
    if config.cors_origins.is_empty() {
        return Err(ConfigError::Invalid {
            field: "cors_origins",
            reason: "list at least one origin, or \"*\"".to_string(),
        });
    }
    Ok(())
}

/// File, then environment, then validation.
pub async fn load_server_config<F>(path: &Path, lookup: F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = load_config_file(path).await?;
    apply_env_overrides(&mut config, lookup)?;
    validate(&config)?;
    Ok(config)
}

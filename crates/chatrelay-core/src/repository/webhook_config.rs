//! Webhook configuration repository trait definition.
//!
//! The configuration is a singleton: at most one record exists, and
//! `set_webhook_config` replaces it in a single atomic write so readers
//! never observe a window with no record.

use chatrelay_types::chat::WebhookConfig;
use chatrelay_types::error::RepositoryError;

/// Repository trait for the webhook configuration singleton.
pub trait WebhookConfigRepository: Send + Sync {
    /// Get the current configuration. Returns None if none was ever set
    /// (or it was cleared).
    fn get_webhook_config(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<WebhookConfig>, RepositoryError>> + Send;

    /// Insert or replace the singleton record.
    fn set_webhook_config(
        &self,
        config: &WebhookConfig,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete the singleton record. Returns the number of records removed.
    fn clear_webhook_config(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}

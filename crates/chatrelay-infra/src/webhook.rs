//! reqwest-backed webhook transport.
//!
//! Implements `WebhookTransport` from `chatrelay-core`: one JSON POST per
//! call on a shared client with a total request timeout.

use std::time::Duration;

use chatrelay_core::relay::WebhookTransport;
use chatrelay_types::error::RelayError;
use chatrelay_types::relay::WebhookPayload;
use tracing::debug;

/// HTTP transport for the webhook relay.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Clone)]
pub struct HttpWebhookTransport {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpWebhookTransport {
    /// Build a transport whose requests give up after `timeout_secs`.
    pub fn new(timeout_secs: u64) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("chatrelay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RelayError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    fn map_send_error(&self, e: reqwest::Error) -> RelayError {
        if e.is_timeout() {
            RelayError::Timeout(self.timeout_secs)
        } else {
            RelayError::Transport(e.to_string())
        }
    }
}

impl WebhookTransport for HttpWebhookTransport {
    async fn post_json(
        &self,
        url: &str,
        payload: &WebhookPayload,
    ) -> Result<serde_json::Value, RelayError> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        debug!(status = status.as_u16(), body_len = body.len(), "Webhook response received");

        serde_json::from_str(&body)
            .map_err(|e| RelayError::MalformedBody(format!("not valid JSON: {e}")))
    }
}

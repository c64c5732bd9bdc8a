//! Webhook relay: forwards a user message to the configured workflow
//! endpoint and turns the result into bot reply text.
//!
//! [`WebhookTransport`] is the outbound HTTP port (implemented in
//! chatrelay-infra with reqwest). [`WebhookRelay`] owns the policy: no URL
//! means no call, one attempt per message, and every failure is downgraded
//! to a fixed apology instead of an error.

pub mod reply;

use chatrelay_types::chat::{ChatSession, WebhookConfig};
use chatrelay_types::error::RelayError;
use chatrelay_types::relay::{RelayOutcome, RemoteReply, WebhookPayload};
use chrono::Utc;
use tracing::{Instrument, debug, error, info_span};

pub use reply::extract_reply;

/// Outbound HTTP port for the relay.
///
/// Implementations send exactly one POST with `payload` as the JSON body and
/// return the parsed JSON response. Non-2xx statuses, timeouts, network
/// failures and non-JSON bodies are all errors.
pub trait WebhookTransport: Send + Sync {
    fn post_json(
        &self,
        url: &str,
        payload: &WebhookPayload,
    ) -> impl std::future::Future<Output = Result<serde_json::Value, RelayError>> + Send;
}

/// Relays chat messages through a [`WebhookTransport`].
pub struct WebhookRelay<T: WebhookTransport> {
    transport: T,
}

impl<T: WebhookTransport> WebhookRelay<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Forward `message` from `session` to the configured webhook.
    ///
    /// Never fails: the outcome records whether a reply arrived, the relay
    /// was unconfigured, or the call failed.
    pub async fn relay(
        &self,
        config: &WebhookConfig,
        session: &ChatSession,
        message: &str,
    ) -> RelayOutcome {
        let Some(url) = config.active_url() else {
            debug!(session_id = %session.id, "No webhook configured, skipping relay");
            return RelayOutcome::NotConfigured;
        };

        let payload = WebhookPayload::new(
            &session.id,
            &session.user_name,
            &session.user_email,
            message,
            Utc::now(),
        );

        debug!(session_id = %session.id, url, "Relaying message to webhook");

        let span = info_span!(
            "webhook.relay",
            chat.session_id = %session.id,
            webhook.url = url,
            chat.message_len = message.len(),
        );

        let result = self
            .transport
            .post_json(url, &payload)
            .instrument(span)
            .await
            .and_then(|body| extract_reply(&body));

        match result {
            Ok(reply) => {
                debug!(
                    session_id = %session.id,
                    raw = matches!(reply, RemoteReply::Raw(_)),
                    "Webhook replied"
                );
                RelayOutcome::Replied(reply)
            }
            Err(e) => {
                error!(session_id = %session.id, error = %e, "Error calling webhook");
                RelayOutcome::Failed(e)
            }
        }
    }
}

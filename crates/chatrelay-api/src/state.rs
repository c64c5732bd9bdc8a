//! Application state wiring all services together.
//!
//! Services are generic over repository and transport traits, but AppState
//! pins them to the concrete infra implementations.

use std::sync::Arc;

use chatrelay_core::chat::service::ChatService;
use chatrelay_core::relay::WebhookRelay;
use chatrelay_core::service::status::StatusService;
use chatrelay_infra::store::StoreBackend;
use chatrelay_infra::webhook::HttpWebhookTransport;
use chatrelay_types::config::ServerConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteChatService = ChatService<StoreBackend, StoreBackend, HttpWebhookTransport>;

pub type ConcreteStatusService = StatusService<StoreBackend>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub status_service: Arc<ConcreteStatusService>,
    pub store: StoreBackend,
}

impl AppState {
    /// Initialize the application state: open the store, wire services.
    pub async fn init(config: &ServerConfig) -> anyhow::Result<Self> {
        let store = StoreBackend::open(config).await?;
        let transport = HttpWebhookTransport::new(config.webhook_timeout_secs)?;
        Ok(Self::from_parts(store, transport))
    }

    /// Wire services over an already-open store.
    pub fn from_parts(store: StoreBackend, transport: HttpWebhookTransport) -> Self {
        let chat_service = ChatService::new(store.clone(), store.clone(), WebhookRelay::new(transport));
        let status_service = StatusService::new(store.clone());

        Self {
            chat_service: Arc::new(chat_service),
            status_service: Arc::new(status_service),
            store,
        }
    }
}

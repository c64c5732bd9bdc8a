//! ChatRepository trait definition.
//!
//! Provides insert/find operations for chat sessions and messages.
//! Sessions and messages are immutable once written, so there are no
//! update or delete operations.

use chatrelay_types::chat::{ChatMessage, ChatSession};
use chatrelay_types::error::RepositoryError;
use uuid::Uuid;

/// Repository trait for chat session and message persistence.
///
/// Implementations live in chatrelay-infra (`SqliteChatRepository`) and in
/// [`crate::repository::memory::InMemoryStore`].
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// Persist a new chat session.
    fn create_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;

    /// Get a chat session by its unique ID.
    fn get_session(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Save a new message within a session.
    fn save_message(
        &self,
        message: &ChatMessage,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get messages for a session, ordered by timestamp ASC.
    ///
    /// Messages sharing a timestamp come back in insertion order. An unknown
    /// session yields an empty list.
    fn get_messages(
        &self,
        session_id: &Uuid,
        limit: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;
}

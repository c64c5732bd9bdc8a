//! Chat session and message persistence plus the send-message workflow.
//!
//! `ChatRepository` is the storage port for sessions and messages;
//! `ChatService` orchestrates session lookup, message persistence, and the
//! webhook relay.

pub mod repository;
pub mod service;

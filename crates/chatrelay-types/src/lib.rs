//! Shared domain types for chatrelay.
//!
//! This crate contains the core domain types used across the workspace:
//! chat sessions and messages, status checks, the webhook configuration
//! singleton, relay payloads/outcomes, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod relay;
pub mod status;

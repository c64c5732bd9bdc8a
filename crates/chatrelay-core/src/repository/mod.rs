//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (chatrelay-infra) implements. The core crate never depends on any
//! specific storage technology; [`memory::InMemoryStore`] implements every
//! port without one.

pub mod memory;
pub mod status;
pub mod webhook_config;

/// Upper bound on records returned by any list query.
pub const MAX_LIST_LIMIT: i64 = 1000;

//! Infrastructure layer for chatrelay.
//!
//! Contains implementations of the ports defined in `chatrelay-core`: SQLite
//! repositories, the runtime store selector, the reqwest webhook transport,
//! and the configuration loader.

pub mod config;
pub mod sqlite;
pub mod store;
pub mod webhook;

//! HTTP/REST API layer for chatrelay.
//!
//! Axum-based REST API under `/api/` with bare JSON responses,
//! `{"detail", "code"}` error bodies, and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;

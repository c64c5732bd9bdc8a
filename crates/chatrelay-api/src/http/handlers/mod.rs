//! HTTP request handlers for the REST API.

pub mod config;
pub mod message;
pub mod session;
pub mod status;

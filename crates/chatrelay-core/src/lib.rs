//! Business logic and repository trait definitions for chatrelay.
//!
//! This crate defines the "ports" (repository and webhook transport traits)
//! that the infrastructure layer implements, plus the relay and the services
//! built on top of them. It depends only on `chatrelay-types` -- never on
//! `chatrelay-infra` or any database/IO crate.

pub mod chat;
pub mod relay;
pub mod repository;
pub mod service;

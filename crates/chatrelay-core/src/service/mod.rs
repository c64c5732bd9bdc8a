//! Business logic services (use cases) outside the chat workflow.
//!
//! Services orchestrate repository calls and business rules. They depend on
//! traits (ports) -- never on concrete infrastructure implementations.

pub mod status;

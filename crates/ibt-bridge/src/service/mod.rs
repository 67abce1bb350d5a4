//! # Service Layer
//!
//! Orchestrates the domain logic over the outbound ports: the pre-flight
//! verification stage and the transfer orchestrator.

pub mod orchestrator;
pub mod verification;

pub use orchestrator::TransferOrchestrator;
pub use verification::verify_bridge_setup;

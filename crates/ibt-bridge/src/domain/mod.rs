//! # Domain Module
//!
//! Core domain types for the bridge: value objects, entities, operation
//! payloads, invariants, the error taxonomy, and configuration.

pub mod config;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod payloads;
pub mod value_objects;

pub use config::BridgeConfig;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use payloads::*;
pub use value_objects::*;

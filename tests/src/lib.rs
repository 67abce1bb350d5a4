//! # IBT Bridge Test Suite
//!
//! Unified test crate for cross-module choreography:
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Fixture wiring + opt-in log output
//! └── integration/      # End-to-end transfer flows
//!     ├── flows.rs          # Completing transfers, both directions
//!     └── failure_modes.rs  # Gating, fragmentation, partial completion
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ibt-tests
//!
//! # With bridge logs
//! RUST_LOG=debug cargo test -p ibt-tests -- --nocapture
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
pub mod support;

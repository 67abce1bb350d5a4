//! # IBT Bridge
//!
//! Transfer orchestration for the IBT token between two independently
//! operated ledgers: an account-based Ethereum chain and an object-based
//! Sui chain.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Per user-initiated transfer, decide which operations run on each chain,
//! in what order, under what pre-conditions:
//! - Pre-flight verification of both deployments before any value moves
//! - Mint-if-insufficient remediation on the Ethereum source side
//! - Deterministic first-fit coin selection on the Sui source side
//! - Explicit partial-completion reporting — no hidden intermediate states
//!
//! ## Module Structure
//!
//! ```text
//! ibt-bridge/
//! ├── domain/          # Amount, addresses, payloads, errors, config
//! ├── algorithms/      # Coin selection, receipt correlation
//! ├── ports/           # BridgeApi, LedgerAdapter, ChainInspector
//! ├── adapters/        # In-memory chain ledgers
//! └── service/         # Verification stage, TransferOrchestrator
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryEthereumLedger, InMemorySuiLedger};
pub use algorithms::{correlate_to_eth, correlate_to_sui, normalize_eth_tx_hash,
    select_spendable_unit};
pub use domain::{
    invariant_positive_amount, invariant_receipt_amounts_match, invariant_source_tx_present,
    Amount, BridgeConfig, BridgeError, ChainId, ChainVerification, ErrorKind, EthAddress,
    EthereumOperation, ObjectId, Receipt, ReceiptPair, SpendableUnit, SuiAddress, SuiOperation,
    Transfer, TransferDirection, TransferOutcome, TransferRequest, TransferState, TxHash,
    VerificationReport, PLACEHOLDER_SOURCE_TX, TOKEN_DECIMALS,
};
pub use ports::{
    BridgeApi, ChainInspector, LedgerAdapter, PendingHandle, SpendableUnitSource,
};
pub use service::{verify_bridge_setup, TransferOrchestrator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

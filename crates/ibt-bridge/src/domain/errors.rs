//! # Domain Errors
//!
//! The bridge error taxonomy. Every chain-facing failure is classified into
//! one of these variants at the ledger-adapter boundary; the orchestrator
//! never inspects chain-specific error codes directly.

use super::value_objects::{Amount, ChainId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalized source-transaction hash (32-byte).
pub type TxHash = [u8; 32];

/// Bridge error types.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Missing or invalid deployment identifier. Fatal, no retry.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Amount string could not be converted to base units, or was zero.
    #[error("invalid amount {input:?}: {reason}")]
    InvalidAmount {
        /// The human-entered decimal string.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Pre-flight verification failed on at least one chain side.
    #[error("verification failed (ethereum ok: {ethereum_ok}, sui ok: {sui_ok}): {detail}")]
    VerificationFailed {
        /// Ethereum-side resources reachable.
        ethereum_ok: bool,
        /// Sui-side resources reachable.
        sui_ok: bool,
        /// Per-chain diagnostics.
        detail: String,
    },

    /// Source balance still below the requested amount after the single
    /// remediation mint. No burn was submitted.
    #[error("insufficient balance after remediation: requested {requested}, balance {balance}")]
    InsufficientAfterRemediation {
        /// Requested transfer amount.
        requested: Amount,
        /// Balance observed after the mint.
        balance: Amount,
    },

    /// No single coin object covers the requested amount. Fragmented
    /// balances are never merged automatically.
    #[error(
        "no single coin with balance >= {required} ({unit_count} coins, largest {largest}, \
         total {total}); merge coins and retry"
    )]
    NoCoinSufficient {
        /// Requested transfer amount.
        required: Amount,
        /// Largest individual coin balance seen.
        largest: Amount,
        /// Sum over all coins (may exceed `required`).
        total: Amount,
        /// Number of coins inspected.
        unit_count: usize,
    },

    /// The chain rejected the operation under its execution rules
    /// (authorization, revert, insufficient balance). Terminal, not retried.
    #[error("{chain} rejected submission: {reason}")]
    SubmissionRejected {
        /// Rejecting chain.
        chain: ChainId,
        /// Chain-level reason, verbatim.
        reason: String,
    },

    /// Finality was not observed in time. The true outcome is unknown: the
    /// caller must re-query, never resubmit.
    #[error("timed out awaiting finality on {chain} for {tx_id}; outcome unknown")]
    FinalityTimeout {
        /// Chain awaiting finality.
        chain: ChainId,
        /// Transaction identifier of the in-flight operation.
        tx_id: String,
    },

    /// The correlator detected an inconsistent cross-chain payload.
    /// Indicates a protocol-level bug, not a user error.
    #[error("malformed receipt: {0}")]
    MalformedReceipt(String),

    /// Chain endpoint unreachable. Distinct from rejection: nothing was
    /// executed.
    #[error("{chain} unreachable: {detail}")]
    Network {
        /// Unreachable chain.
        chain: ChainId,
        /// Transport-level detail.
        detail: String,
    },

    /// Illegal transfer state transition. Guards against orchestrator bugs.
    #[error("invalid transfer transition: {from} -> {to}")]
    InvalidTransition {
        /// Current state.
        from: String,
        /// Attempted state.
        to: String,
    },
}

impl BridgeError {
    /// Stable error kind surfaced to callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::Configuration(_) => ErrorKind::Configuration,
            BridgeError::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            BridgeError::VerificationFailed { .. } => ErrorKind::VerificationFailed,
            BridgeError::InsufficientAfterRemediation { .. } => {
                ErrorKind::InsufficientAfterRemediation
            }
            BridgeError::NoCoinSufficient { .. } => ErrorKind::NoCoinSufficient,
            BridgeError::SubmissionRejected { .. } => ErrorKind::SubmissionRejected,
            BridgeError::FinalityTimeout { .. } => ErrorKind::FinalityTimeout,
            BridgeError::MalformedReceipt(_) => ErrorKind::MalformedReceipt,
            BridgeError::Network { .. } => ErrorKind::Network,
            BridgeError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
        }
    }
}

/// Stable, caller-facing error classification.
///
/// A UI maps these to user guidance; the `Display` of the underlying
/// [`BridgeError`] supplies the human-readable detail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Missing/invalid identifiers; fatal.
    Configuration,
    /// Unparsable or zero amount; caller fixes input.
    InvalidAmount,
    /// Pre-flight resource absent; retry after deployment is fixed.
    VerificationFailed,
    /// Balance short after the one permitted mint; user-actionable.
    InsufficientAfterRemediation,
    /// No single coin covers the request; user merges coins.
    NoCoinSufficient,
    /// Chain-level rejection; surfaced verbatim, not retried.
    SubmissionRejected,
    /// Outcome unknown; re-query before treating as failure.
    FinalityTimeout,
    /// Inconsistent cross-chain payload; protocol bug.
    MalformedReceipt,
    /// Endpoint unreachable.
    Network,
    /// Internal state-machine misuse.
    InvalidTransition,
}

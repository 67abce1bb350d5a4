//! # Domain Entities
//!
//! Core entities for bridge transfers: the transfer request, its state
//! machine, chain receipts, spendable coin objects, and the outcome
//! surfaced to callers.

use super::errors::BridgeError;
use super::value_objects::{Amount, ChainId, EthAddress, ObjectId, SuiAddress, TransferDirection};
use serde::{Deserialize, Serialize};

/// A validated user-initiated transfer.
///
/// Exists only for the duration of one orchestration call; there is no
/// durable pending-transfer ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Transfer direction.
    pub direction: TransferDirection,
    /// Amount in base units, already converted from the decimal string.
    pub amount: Amount,
    /// The party's Ethereum account.
    pub eth_party: EthAddress,
    /// The party's Sui account.
    pub sui_party: SuiAddress,
}

impl TransferRequest {
    /// Create a request. Zero amounts are rejected before any chain call.
    pub fn new(
        direction: TransferDirection,
        amount: Amount,
        eth_party: EthAddress,
        sui_party: SuiAddress,
    ) -> Result<Self, BridgeError> {
        super::invariants::invariant_positive_amount(amount)?;
        Ok(Self {
            direction,
            amount,
            eth_party,
            sui_party,
        })
    }
}

/// Proof that a submitted operation reached finality on one chain.
///
/// Immutable once produced by a ledger adapter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Chain the operation executed on.
    pub chain: ChainId,
    /// Transaction identifier as returned by the chain (0x-hex on Ethereum,
    /// digest hex on Sui).
    pub tx_id: String,
    /// Finalized amount.
    pub amount: Amount,
    /// Block number / checkpoint sequence at finality.
    pub block_ref: u64,
}

/// Source and destination receipts of a completed transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptPair {
    /// Source-chain burn/lock receipt.
    pub source: Receipt,
    /// Destination-chain mint receipt.
    pub destination: Receipt,
}

/// A discrete value-carrying coin object on the Sui side.
///
/// Balances are fragmented across many such units owned by one party,
/// never a single mutable account balance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendableUnit {
    /// Coin object id.
    pub id: ObjectId,
    /// Balance carried by this object.
    pub balance: Amount,
}

/// Diagnostic result of one chain-side pre-flight probe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainVerification {
    /// Probed chain.
    pub chain: ChainId,
    /// Bridge resources present and reachable.
    pub ok: bool,
    /// Human-readable diagnostic.
    pub detail: String,
}

/// Combined pre-flight verification over both chain sides.
///
/// Recomputed per transfer attempt, never cached: chain state can change
/// between transfers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Ethereum-side probe.
    pub ethereum: ChainVerification,
    /// Sui-side probe.
    pub sui: ChainVerification,
}

impl VerificationReport {
    /// True only when both chain sides verified.
    pub fn both_ok(&self) -> bool {
        self.ethereum.ok && self.sui.ok
    }

    /// Fail the transfer attempt unless both sides verified.
    pub fn require_both_ok(&self) -> Result<(), BridgeError> {
        if self.both_ok() {
            return Ok(());
        }
        Err(BridgeError::VerificationFailed {
            ethereum_ok: self.ethereum.ok,
            sui_ok: self.sui.ok,
            detail: format!("ethereum: {}; sui: {}", self.ethereum.detail, self.sui.detail),
        })
    }
}

/// Transfer state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferState {
    /// Request accepted, nothing submitted.
    #[default]
    Idle,
    /// Pre-flight probes in flight.
    Verifying,
    /// Source-chain burn/lock step.
    SourceOperation,
    /// One-shot mint of missing source liquidity (Ethereum source only).
    SourceRemediation,
    /// Destination-chain mint step.
    DestinationOperation,
    /// Both receipts obtained.
    Completed,
    /// Terminal failure.
    Failed,
}

impl TransferState {
    /// Check if a transition is valid.
    ///
    /// `Failed` is reachable from every non-terminal state; remediation is
    /// entered from and returns to the source step.
    pub fn can_transition_to(&self, next: TransferState) -> bool {
        match (self, next) {
            (Self::Idle, Self::Verifying) => true,
            (Self::Verifying, Self::SourceOperation) => true,
            (Self::SourceOperation, Self::SourceRemediation) => true,
            (Self::SourceRemediation, Self::SourceOperation) => true,
            (Self::SourceOperation, Self::DestinationOperation) => true,
            (Self::DestinationOperation, Self::Completed) => true,
            (from, Self::Failed) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// A transfer in flight: the request plus its current state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transfer {
    /// The validated request.
    pub request: TransferRequest,
    /// Current state.
    pub state: TransferState,
}

impl Transfer {
    /// Start tracking a transfer in `Idle`.
    pub fn new(request: TransferRequest) -> Self {
        Self {
            request,
            state: TransferState::Idle,
        }
    }

    /// Transition to a new state.
    pub fn transition_to(&mut self, next: TransferState) -> Result<(), BridgeError> {
        if !self.state.can_transition_to(next) {
            return Err(BridgeError::InvalidTransition {
                from: format!("{:?}", self.state),
                to: format!("{:?}", next),
            });
        }
        self.state = next;
        Ok(())
    }
}

/// Outcome of one `request_transfer` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferOutcome {
    /// Both chain operations finalized.
    Completed(ReceiptPair),
    /// The transfer failed before any source-chain value left the party.
    Failed {
        /// Stable error classification.
        kind: super::errors::ErrorKind,
        /// Human-readable detail.
        detail: String,
    },
    /// The source burn/lock finalized but the destination operation did not.
    ///
    /// Funds are in an intermediate state requiring manual intervention;
    /// this is never auto-corrected and never conflated with total failure.
    PartiallyCompleted {
        /// The finalized source-chain receipt.
        source_receipt: Receipt,
        /// Stable error classification of the destination failure.
        kind: super::errors::ErrorKind,
        /// Human-readable detail.
        detail: String,
    },
}

impl TransferOutcome {
    /// True for `Completed`.
    pub fn is_completed(&self) -> bool {
        matches!(self, TransferOutcome::Completed(_))
    }
}

//! # Outbound Ports
//!
//! Traits for the external collaborators the orchestrator depends on: the
//! two chain ledgers, their pre-flight inspection primitives, and the Sui
//! coin listing. Signing happens behind `submit` via the session wallet;
//! the core never manages keys.

use crate::domain::{Amount, BridgeError, ChainId, ChainVerification, Receipt, SpendableUnit,
    SuiAddress};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlation handle for a submitted, not-yet-final operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingHandle {
    /// Correlation id for logs and re-queries.
    pub id: Uuid,
    /// Chain the operation was submitted to.
    pub chain: ChainId,
    /// Transaction identifier assigned at submission.
    pub tx_id: String,
}

/// Uniform capability surface over one concrete chain.
///
/// The address and operation types are chain-scoped: an Ethereum ledger
/// cannot be handed a Sui payload, and vice versa. Side effects are
/// irreversible once finality is reported; an adapter must not report
/// finality before the underlying chain's own guarantee is met.
#[async_trait]
pub trait LedgerAdapter: Send + Sync {
    /// Chain-scoped owner address type.
    type Address: Clone + Send + Sync;
    /// Chain-scoped, construction-validated operation payload.
    type Operation: Send + 'static;

    /// Total spendable IBT balance of `owner`.
    async fn read_balance(&self, owner: &Self::Address) -> Result<Amount, BridgeError>;

    /// Sign and submit one token operation through the session wallet.
    ///
    /// A chain-level rejection (authorization, revert, insufficient
    /// balance) is `SubmissionRejected`; an unreachable endpoint is
    /// `Network`. Neither implies anything was executed.
    async fn submit(&self, op: Self::Operation) -> Result<PendingHandle, BridgeError>;

    /// Block until the submitted operation reaches the chain's own
    /// finality guarantee.
    ///
    /// Distinguishes a definite rejection (`SubmissionRejected`) from an
    /// ambiguous `FinalityTimeout`, after which the true outcome must be
    /// re-queried via [`LedgerAdapter::query_outcome`] — never assumed
    /// failed, never resubmitted.
    async fn await_finality(&self, handle: &PendingHandle) -> Result<Receipt, BridgeError>;

    /// Re-query the outcome of a previously submitted operation.
    ///
    /// `Ok(Some(receipt))` if it finalized, `Ok(None)` if still unknown.
    async fn query_outcome(&self, handle: &PendingHandle) -> Result<Option<Receipt>, BridgeError>;
}

/// Pre-flight interrogation of one chain's bridge resources.
///
/// Each chain answers with its own primitives (code at the contract
/// address, object existence and type). Never cached by callers.
#[async_trait]
pub trait ChainInspector: Send + Sync {
    /// Probe the bridge-relevant resources on this chain.
    async fn verify_setup(&self) -> ChainVerification;
}

/// Listing of the discrete coin objects a Sui party owns.
#[async_trait]
pub trait SpendableUnitSource: Send + Sync {
    /// All IBT coin objects owned by `owner`.
    async fn list_spendable_units(
        &self,
        owner: &SuiAddress,
    ) -> Result<Vec<SpendableUnit>, BridgeError>;
}

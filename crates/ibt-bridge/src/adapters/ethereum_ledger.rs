//! Ethereum Ledger Adapter
//!
//! Implements the `LedgerAdapter` port over an in-memory model of the IBT
//! ERC-20 contract. In production this would make JSON-RPC calls through
//! the connected wallet; here the chain's execution rules (owner-gated
//! mint, balance-gated burn) and its failure modes are simulated, with
//! injection knobs for the ambiguous ones.

use crate::domain::{
    Amount, BridgeError, ChainId, ChainVerification, EthAddress, EthereumOperation, Receipt,
};
use crate::ports::outbound::{ChainInspector, LedgerAdapter, PendingHandle};
use async_trait::async_trait;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// In-memory Ethereum ledger holding IBT account balances.
#[derive(Debug)]
pub struct InMemoryEthereumLedger {
    contract: EthAddress,
    owner: EthAddress,
    signer: EthAddress,
    state: RwLock<LedgerState>,
}

#[derive(Default, Debug)]
struct LedgerState {
    contract_present: bool,
    network_down: bool,
    reject_next: Option<String>,
    finality_times_out: bool,
    finalize_on_query: bool,
    mint_cap: Option<Amount>,
    balances: HashMap<EthAddress, Amount>,
    pending: HashMap<Uuid, PendingOp>,
    block_number: u64,
    nonce: u64,
    finalized_ops: Vec<EthereumOperation>,
}

#[derive(Debug)]
struct PendingOp {
    op: EthereumOperation,
    tx_id: String,
    applied: Option<Receipt>,
}

impl InMemoryEthereumLedger {
    /// Create a ledger for `contract`, deployed by `owner`, with `signer`
    /// as the wallet's connected account.
    pub fn new(contract: EthAddress, owner: EthAddress, signer: EthAddress) -> Self {
        Self {
            contract,
            owner,
            signer,
            state: RwLock::new(LedgerState {
                contract_present: true,
                block_number: 1,
                ..LedgerState::default()
            }),
        }
    }

    /// Seed an account balance.
    pub fn credit(&self, account: EthAddress, amount: Amount) {
        let mut state = self.state.write();
        let entry = state.balances.entry(account).or_insert(Amount::zero());
        *entry = entry.checked_add(amount).unwrap_or(*entry);
    }

    /// Simulate an unreachable endpoint.
    pub fn set_network_down(&self, down: bool) {
        self.state.write().network_down = down;
    }

    /// Reject the next submission with the given chain-level reason.
    pub fn reject_next_submission(&self, reason: impl Into<String>) {
        self.state.write().reject_next = Some(reason.into());
    }

    /// Make `await_finality` report an ambiguous timeout instead of a
    /// receipt.
    pub fn set_finality_timeout(&self, times_out: bool) {
        self.state.write().finality_times_out = times_out;
    }

    /// Let a timed-out operation finalize when re-queried.
    pub fn set_finalize_on_query(&self, resolve: bool) {
        self.state.write().finalize_on_query = resolve;
    }

    /// Cap the amount any single mint actually credits.
    pub fn set_mint_cap(&self, cap: Option<Amount>) {
        self.state.write().mint_cap = cap;
    }

    /// Simulate a missing contract deployment.
    pub fn remove_contract(&self) {
        self.state.write().contract_present = false;
    }

    /// Operations that reached finality, in order.
    pub fn finalized_operations(&self) -> Vec<EthereumOperation> {
        self.state.read().finalized_ops.clone()
    }

    fn make_tx_id(nonce: u64, op: &EthereumOperation) -> String {
        let mut hasher = Sha256::new();
        hasher.update(nonce.to_le_bytes());
        let mut amount_bytes = [0u8; 32];
        match op {
            EthereumOperation::Mint { to, amount } => {
                hasher.update([0u8]);
                hasher.update(to.0);
                amount.base_units().to_little_endian(&mut amount_bytes);
            }
            EthereumOperation::Burn { from, amount } => {
                hasher.update([1u8]);
                hasher.update(from.0);
                amount.base_units().to_little_endian(&mut amount_bytes);
            }
        }
        hasher.update(amount_bytes);
        format!("0x{}", hex::encode(hasher.finalize()))
    }

    /// Apply one finalized operation to the balance map.
    fn apply(state: &mut LedgerState, op: &EthereumOperation, tx_id: &str) -> Receipt {
        state.block_number += 1;
        let effective = match op {
            EthereumOperation::Mint { to, amount } => {
                let credited = match state.mint_cap {
                    Some(cap) if cap < *amount => cap,
                    _ => *amount,
                };
                let entry = state.balances.entry(*to).or_insert(Amount::zero());
                *entry = entry.checked_add(credited).unwrap_or(*entry);
                credited
            }
            EthereumOperation::Burn { from, amount } => {
                let entry = state.balances.entry(*from).or_insert(Amount::zero());
                *entry = entry.checked_sub(*amount).unwrap_or(Amount::zero());
                *amount
            }
        };
        state.finalized_ops.push(op.clone());

        info!(
            "[bridge] ethereum finalized {} at block {}",
            tx_id, state.block_number
        );

        Receipt {
            chain: ChainId::Ethereum,
            tx_id: tx_id.to_string(),
            amount: effective,
            block_ref: state.block_number,
        }
    }
}

#[async_trait]
impl LedgerAdapter for InMemoryEthereumLedger {
    type Address = EthAddress;
    type Operation = EthereumOperation;

    async fn read_balance(&self, owner: &EthAddress) -> Result<Amount, BridgeError> {
        let state = self.state.read();
        if state.network_down {
            return Err(BridgeError::Network {
                chain: ChainId::Ethereum,
                detail: "endpoint unreachable".to_string(),
            });
        }
        Ok(state
            .balances
            .get(owner)
            .copied()
            .unwrap_or(Amount::zero()))
    }

    async fn submit(&self, op: EthereumOperation) -> Result<PendingHandle, BridgeError> {
        let mut state = self.state.write();
        if state.network_down {
            return Err(BridgeError::Network {
                chain: ChainId::Ethereum,
                detail: "endpoint unreachable".to_string(),
            });
        }
        if let Some(reason) = state.reject_next.take() {
            return Err(BridgeError::SubmissionRejected {
                chain: ChainId::Ethereum,
                reason,
            });
        }
        if !state.contract_present {
            return Err(BridgeError::SubmissionRejected {
                chain: ChainId::Ethereum,
                reason: format!("no contract code at {}", self.contract),
            });
        }

        // The chain's own execution rules: the mint is owner-gated, the
        // burn is balance-gated.
        match &op {
            EthereumOperation::Mint { .. } if self.signer != self.owner => {
                return Err(BridgeError::SubmissionRejected {
                    chain: ChainId::Ethereum,
                    reason: "execution reverted: caller is not the owner".to_string(),
                });
            }
            EthereumOperation::Burn { from, amount } => {
                let balance = state
                    .balances
                    .get(from)
                    .copied()
                    .unwrap_or(Amount::zero());
                if balance < *amount {
                    return Err(BridgeError::SubmissionRejected {
                        chain: ChainId::Ethereum,
                        reason: "execution reverted: burn amount exceeds balance".to_string(),
                    });
                }
            }
            _ => {}
        }

        state.nonce += 1;
        let tx_id = Self::make_tx_id(state.nonce, &op);
        let handle = PendingHandle {
            id: Uuid::new_v4(),
            chain: ChainId::Ethereum,
            tx_id: tx_id.clone(),
        };

        debug!("[bridge] ethereum submitted {:?} as {}", op, tx_id);
        state.pending.insert(handle.id, PendingOp {
            op,
            tx_id,
            applied: None,
        });
        Ok(handle)
    }

    async fn await_finality(&self, handle: &PendingHandle) -> Result<Receipt, BridgeError> {
        let mut state = self.state.write();
        if state.network_down {
            return Err(BridgeError::Network {
                chain: ChainId::Ethereum,
                detail: "endpoint unreachable".to_string(),
            });
        }
        if state.finality_times_out {
            warn!(
                "[bridge] ethereum finality timed out for {}",
                handle.tx_id
            );
            return Err(BridgeError::FinalityTimeout {
                chain: ChainId::Ethereum,
                tx_id: handle.tx_id.clone(),
            });
        }

        let mut pending = state.pending.remove(&handle.id).ok_or_else(|| {
            BridgeError::SubmissionRejected {
                chain: ChainId::Ethereum,
                reason: format!("unknown submission {}", handle.id),
            }
        })?;
        let receipt = match pending.applied.clone() {
            Some(receipt) => receipt,
            None => Self::apply(&mut state, &pending.op, &pending.tx_id),
        };
        // Finalized operations stay queryable
        pending.applied = Some(receipt.clone());
        state.pending.insert(handle.id, pending);
        Ok(receipt)
    }

    async fn query_outcome(&self, handle: &PendingHandle) -> Result<Option<Receipt>, BridgeError> {
        let mut state = self.state.write();
        if state.network_down {
            return Err(BridgeError::Network {
                chain: ChainId::Ethereum,
                detail: "endpoint unreachable".to_string(),
            });
        }

        let Some(mut pending) = state.pending.remove(&handle.id) else {
            return Ok(None);
        };
        if pending.applied.is_none() && !state.finalize_on_query {
            debug!("[bridge] ethereum outcome of {} still unknown", handle.tx_id);
            state.pending.insert(handle.id, pending);
            return Ok(None);
        }

        let receipt = match pending.applied.clone() {
            Some(receipt) => receipt,
            None => Self::apply(&mut state, &pending.op, &pending.tx_id),
        };
        pending.applied = Some(receipt.clone());
        state.pending.insert(handle.id, pending);
        Ok(Some(receipt))
    }
}

#[async_trait]
impl ChainInspector for InMemoryEthereumLedger {
    async fn verify_setup(&self) -> ChainVerification {
        let state = self.state.read();
        let (ok, detail) = if state.network_down {
            (false, "ethereum endpoint unreachable".to_string())
        } else if !state.contract_present {
            (false, format!("no contract code at {}", self.contract))
        } else {
            let balance = state
                .balances
                .get(&self.signer)
                .copied()
                .unwrap_or(Amount::zero());
            (
                true,
                format!(
                    "contract {} owned by {}, signer balance {}",
                    self.contract, self.owner, balance
                ),
            )
        };
        debug!("[bridge] ethereum verification: ok={} {}", ok, detail);
        ChainVerification {
            chain: ChainId::Ethereum,
            ok,
            detail,
        }
    }
}

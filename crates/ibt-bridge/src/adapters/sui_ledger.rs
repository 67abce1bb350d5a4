//! Sui Ledger Adapter
//!
//! Implements the `LedgerAdapter`, `ChainInspector`, and
//! `SpendableUnitSource` ports over an in-memory model of the IBT coin
//! module. Balances live in discrete coin objects; `burn_for_bridge`
//! consumes the whole selected object. In production this would build and
//! sign transaction blocks against a fullnode.

use crate::domain::{
    Amount, BridgeError, ChainId, ChainVerification, ObjectId, Receipt, SpendableUnit, SuiAddress,
    SuiOperation,
};
use crate::ports::outbound::{ChainInspector, LedgerAdapter, PendingHandle, SpendableUnitSource};
use async_trait::async_trait;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Gas budget attached to every transaction block.
const GAS_BUDGET: u64 = 50_000_000;

/// In-memory Sui ledger holding IBT coin objects per owner.
#[derive(Debug)]
pub struct InMemorySuiLedger {
    package_id: ObjectId,
    admin_cap_id: ObjectId,
    state: RwLock<SuiState>,
}

#[derive(Default, Debug)]
struct SuiState {
    package_present: bool,
    admin_cap_present: bool,
    network_down: bool,
    reject_next: Option<String>,
    finality_times_out: bool,
    finalize_on_query: bool,
    coins: HashMap<SuiAddress, BTreeMap<ObjectId, Amount>>,
    pending: HashMap<Uuid, PendingSuiOp>,
    checkpoint: u64,
    object_counter: u64,
    finalized_ops: Vec<SuiOperation>,
}

#[derive(Debug)]
struct PendingSuiOp {
    op: SuiOperation,
    digest: String,
    applied: Option<Receipt>,
}

impl InMemorySuiLedger {
    /// Create a ledger with the bridge package and AdminCap deployed.
    pub fn new(package_id: ObjectId, admin_cap_id: ObjectId) -> Self {
        Self {
            package_id,
            admin_cap_id,
            state: RwLock::new(SuiState {
                package_present: true,
                admin_cap_present: true,
                checkpoint: 1,
                ..SuiState::default()
            }),
        }
    }

    /// Seed a coin object for `owner` and return its id.
    pub fn seed_coin(&self, owner: SuiAddress, balance: Amount) -> ObjectId {
        let mut state = self.state.write();
        state.object_counter += 1;
        let id = Self::derive_object_id(&owner, state.object_counter);
        state.coins.entry(owner).or_default().insert(id, balance);
        id
    }

    /// Simulate an unreachable fullnode.
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

    /// Simulate an unpublished bridge package.
    pub fn remove_package(&self) {
        self.state.write().package_present = false;
    }

    /// Simulate a missing AdminCap object.
    pub fn remove_admin_cap(&self) {
        self.state.write().admin_cap_present = false;
    }

    /// Operations that reached finality, in order.
    pub fn finalized_operations(&self) -> Vec<SuiOperation> {
        self.state.read().finalized_ops.clone()
    }

    fn derive_object_id(owner: &SuiAddress, counter: u64) -> ObjectId {
        let mut hasher = Sha256::new();
        hasher.update(b"coin");
        hasher.update(owner.0);
        hasher.update(counter.to_le_bytes());
        ObjectId(hasher.finalize().into())
    }

    fn make_digest(checkpoint: u64, op: &SuiOperation) -> String {
        let mut hasher = Sha256::new();
        hasher.update(checkpoint.to_le_bytes());
        let mut amount_bytes = [0u8; 32];
        match op {
            SuiOperation::MintBridged {
                recipient,
                amount,
                source_tx,
                ..
            } => {
                hasher.update([0u8]);
                hasher.update(recipient.0);
                hasher.update(source_tx);
                amount.base_units().to_little_endian(&mut amount_bytes);
            }
            SuiOperation::BurnForBridge {
                unit,
                amount,
                eth_recipient,
                ..
            } => {
                hasher.update([1u8]);
                hasher.update(unit.0);
                hasher.update(eth_recipient.0);
                amount.base_units().to_little_endian(&mut amount_bytes);
            }
        }
        hasher.update(amount_bytes);
        hex::encode(hasher.finalize())
    }

    fn apply(state: &mut SuiState, op: &SuiOperation, digest: &str) -> Receipt {
        state.checkpoint += 1;
        let amount = match op {
            SuiOperation::MintBridged {
                recipient, amount, ..
            } => {
                state.object_counter += 1;
                let id = Self::derive_object_id(recipient, state.object_counter);
                state
                    .coins
                    .entry(*recipient)
                    .or_default()
                    .insert(id, *amount);
                *amount
            }
            SuiOperation::BurnForBridge { unit, amount, .. } => {
                // burn_for_bridge consumes the whole coin object
                for units in state.coins.values_mut() {
                    units.remove(unit);
                }
                *amount
            }
        };
        state.finalized_ops.push(op.clone());

        info!(
            "[bridge] sui finalized {} at checkpoint {}",
            digest, state.checkpoint
        );

        Receipt {
            chain: ChainId::Sui,
            tx_id: digest.to_string(),
            amount,
            block_ref: state.checkpoint,
        }
    }

    fn check_admin_cap(&self, state: &SuiState, cap: &ObjectId) -> Result<(), BridgeError> {
        if !state.admin_cap_present || *cap != self.admin_cap_id {
            return Err(BridgeError::SubmissionRejected {
                chain: ChainId::Sui,
                reason: format!("execution reverted: unknown AdminCap object {cap}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl LedgerAdapter for InMemorySuiLedger {
    type Address = SuiAddress;
    type Operation = SuiOperation;

    async fn read_balance(&self, owner: &SuiAddress) -> Result<Amount, BridgeError> {
        let state = self.state.read();
        if state.network_down {
            return Err(BridgeError::Network {
                chain: ChainId::Sui,
                detail: "fullnode unreachable".to_string(),
            });
        }
        // Sum over the owner's coin objects, never a single account slot.
        let total = state
            .coins
            .get(owner)
            .map(|units| {
                units
                    .values()
                    .try_fold(Amount::zero(), |acc, b| acc.checked_add(*b))
                    .unwrap_or(Amount::zero())
            })
            .unwrap_or(Amount::zero());
        Ok(total)
    }

    async fn submit(&self, op: SuiOperation) -> Result<PendingHandle, BridgeError> {
        let mut state = self.state.write();
        if state.network_down {
            return Err(BridgeError::Network {
                chain: ChainId::Sui,
                detail: "fullnode unreachable".to_string(),
            });
        }
        if let Some(reason) = state.reject_next.take() {
            return Err(BridgeError::SubmissionRejected {
                chain: ChainId::Sui,
                reason,
            });
        }
        if !state.package_present {
            return Err(BridgeError::SubmissionRejected {
                chain: ChainId::Sui,
                reason: format!("package {} not found", self.package_id),
            });
        }

        match &op {
            SuiOperation::MintBridged { admin_cap, .. } => {
                self.check_admin_cap(&state, admin_cap)?;
            }
            SuiOperation::BurnForBridge {
                admin_cap,
                unit,
                amount,
                ..
            } => {
                self.check_admin_cap(&state, admin_cap)?;
                let balance = state
                    .coins
                    .values()
                    .find_map(|units| units.get(unit))
                    .copied();
                match balance {
                    None => {
                        return Err(BridgeError::SubmissionRejected {
                            chain: ChainId::Sui,
                            reason: format!("coin object {unit} not found"),
                        });
                    }
                    Some(balance) if balance < *amount => {
                        return Err(BridgeError::SubmissionRejected {
                            chain: ChainId::Sui,
                            reason: "execution reverted: coin balance below bridged amount"
                                .to_string(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        let digest = Self::make_digest(state.checkpoint, &op);
        let handle = PendingHandle {
            id: Uuid::new_v4(),
            chain: ChainId::Sui,
            tx_id: digest.clone(),
        };

        debug!(
            "[bridge] sui submitted {:?} as {} (gas budget {})",
            op, digest, GAS_BUDGET
        );
        state.pending.insert(handle.id, PendingSuiOp {
            op,
            digest,
            applied: None,
        });
        Ok(handle)
    }

    async fn await_finality(&self, handle: &PendingHandle) -> Result<Receipt, BridgeError> {
        let mut state = self.state.write();
        if state.network_down {
            return Err(BridgeError::Network {
                chain: ChainId::Sui,
                detail: "fullnode unreachable".to_string(),
            });
        }
        if state.finality_times_out {
            warn!("[bridge] sui finality timed out for {}", handle.tx_id);
            return Err(BridgeError::FinalityTimeout {
                chain: ChainId::Sui,
                tx_id: handle.tx_id.clone(),
            });
        }

        let mut pending = state.pending.remove(&handle.id).ok_or_else(|| {
            BridgeError::SubmissionRejected {
                chain: ChainId::Sui,
                reason: format!("unknown submission {}", handle.id),
            }
        })?;
        let receipt = match pending.applied.clone() {
            Some(receipt) => receipt,
            None => Self::apply(&mut state, &pending.op, &pending.digest),
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
                chain: ChainId::Sui,
                detail: "fullnode unreachable".to_string(),
            });
        }

        let Some(mut pending) = state.pending.remove(&handle.id) else {
            return Ok(None);
        };
        if pending.applied.is_none() && !state.finalize_on_query {
            debug!("[bridge] sui outcome of {} still unknown", handle.tx_id);
            state.pending.insert(handle.id, pending);
            return Ok(None);
        }

        let receipt = match pending.applied.clone() {
            Some(receipt) => receipt,
            None => Self::apply(&mut state, &pending.op, &pending.digest),
        };
        pending.applied = Some(receipt.clone());
        state.pending.insert(handle.id, pending);
        Ok(Some(receipt))
    }
}

#[async_trait]
impl ChainInspector for InMemorySuiLedger {
    async fn verify_setup(&self) -> ChainVerification {
        let state = self.state.read();
        let (ok, detail) = if state.network_down {
            (false, "sui fullnode unreachable".to_string())
        } else if !state.package_present {
            (false, format!("package {} not found", self.package_id))
        } else if !state.admin_cap_present {
            (false, format!("AdminCap {} not found", self.admin_cap_id))
        } else {
            (
                true,
                format!(
                    "package {} and AdminCap {} found",
                    self.package_id, self.admin_cap_id
                ),
            )
        };
        debug!("[bridge] sui verification: ok={} {}", ok, detail);
        ChainVerification {
            chain: ChainId::Sui,
            ok,
            detail,
        }
    }
}

#[async_trait]
impl SpendableUnitSource for InMemorySuiLedger {
    async fn list_spendable_units(
        &self,
        owner: &SuiAddress,
    ) -> Result<Vec<SpendableUnit>, BridgeError> {
        let state = self.state.read();
        if state.network_down {
            return Err(BridgeError::Network {
                chain: ChainId::Sui,
                detail: "fullnode unreachable".to_string(),
            });
        }
        // BTreeMap iteration keeps the listing ordered by object id.
        Ok(state
            .coins
            .get(owner)
            .map(|units| {
                units
                    .iter()
                    .map(|(id, balance)| SpendableUnit {
                        id: *id,
                        balance: *balance,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

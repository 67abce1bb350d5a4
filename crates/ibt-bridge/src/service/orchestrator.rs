//! # Transfer Orchestrator
//!
//! The bridge core: sequences source-side and destination-side operations
//! per transfer direction, applies the insufficient-balance remediation
//! policy, and folds every underlying failure into the stable error
//! taxonomy. One transfer per call; a destination operation is never
//! submitted before the source operation's receipt exists.

use crate::algorithms::{correlate_to_eth, correlate_to_sui, select_spendable_unit};
use crate::domain::invariants::invariant_receipt_amounts_match;
use crate::domain::{
    Amount, BridgeConfig, BridgeError, EthAddress, EthereumOperation, Receipt, ReceiptPair,
    SuiAddress, SuiOperation, Transfer, TransferDirection, TransferOutcome, TransferRequest,
    TransferState, PLACEHOLDER_SOURCE_TX,
};
use crate::ports::inbound::BridgeApi;
use crate::ports::outbound::{ChainInspector, LedgerAdapter, SpendableUnitSource};
use crate::service::verification::verify_bridge_setup;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fixed Sui test-liquidity allotment, in whole tokens.
const SUI_TEST_MINT_TOKENS: u64 = 1000;

/// Orchestrates bridge transfers between the two ledgers.
///
/// Holds the privileged capability by identifier only (via the config);
/// single-writer use of that capability is the deployment's concern —
/// run one orchestrator per capability.
#[derive(Debug)]
pub struct TransferOrchestrator<E, S> {
    config: BridgeConfig,
    ethereum: Arc<E>,
    sui: Arc<S>,
}

/// Internal failure carrying whether the source side already finalized.
struct TransferFailure {
    error: BridgeError,
    source_receipt: Option<Receipt>,
}

impl TransferFailure {
    fn partial(error: BridgeError, source_receipt: Receipt) -> Self {
        Self {
            error,
            source_receipt: Some(source_receipt),
        }
    }
}

impl From<BridgeError> for TransferFailure {
    fn from(error: BridgeError) -> Self {
        Self {
            error,
            source_receipt: None,
        }
    }
}

impl<E, S> TransferOrchestrator<E, S>
where
    E: LedgerAdapter<Address = EthAddress, Operation = EthereumOperation> + ChainInspector,
    S: LedgerAdapter<Address = SuiAddress, Operation = SuiOperation>
        + ChainInspector
        + SpendableUnitSource,
{
    /// Create an orchestrator over validated configuration.
    pub fn new(config: BridgeConfig, ethereum: Arc<E>, sui: Arc<S>) -> Result<Self, BridgeError> {
        config.validate()?;
        Ok(Self {
            config,
            ethereum,
            sui,
        })
    }

    async fn execute(&self, transfer: &mut Transfer) -> Result<ReceiptPair, TransferFailure> {
        transfer.transition_to(TransferState::Verifying)?;
        let report = verify_bridge_setup(self.ethereum.as_ref(), self.sui.as_ref()).await;
        report.require_both_ok()?;

        transfer.transition_to(TransferState::SourceOperation)?;
        let request = transfer.request.clone();
        let source_receipt = match request.direction {
            TransferDirection::EthereumToSui => self.ethereum_source_step(transfer).await?,
            TransferDirection::SuiToEthereum => self.sui_source_step(&request).await?,
        };
        info!(
            "[bridge] source operation finalized: {} {}",
            source_receipt.chain, source_receipt.tx_id
        );

        // Past this point the source burn is irreversible; any failure is
        // reported as partial completion, never rolled back.
        transfer
            .transition_to(TransferState::DestinationOperation)
            .map_err(|e| TransferFailure::partial(e, source_receipt.clone()))?;

        let destination_receipt = match request.direction {
            TransferDirection::EthereumToSui => {
                let op = correlate_to_sui(
                    &source_receipt,
                    request.amount,
                    self.config.sui_admin_cap_id,
                    request.sui_party,
                )
                .map_err(|e| TransferFailure::partial(e, source_receipt.clone()))?;
                submit_and_finalize(self.sui.as_ref(), op)
                    .await
                    .map_err(|e| TransferFailure::partial(e, source_receipt.clone()))?
            }
            TransferDirection::SuiToEthereum => {
                let op = correlate_to_eth(&source_receipt, request.amount, request.eth_party)
                    .map_err(|e| TransferFailure::partial(e, source_receipt.clone()))?;
                submit_and_finalize(self.ethereum.as_ref(), op)
                    .await
                    .map_err(|e| TransferFailure::partial(e, source_receipt.clone()))?
            }
        };

        invariant_receipt_amounts_match(&source_receipt, &destination_receipt)
            .map_err(|e| TransferFailure::partial(e, source_receipt.clone()))?;
        transfer.transition_to(TransferState::Completed)?;

        Ok(ReceiptPair {
            source: source_receipt,
            destination: destination_receipt,
        })
    }

    /// Ethereum as source: remediate a short balance with exactly one mint,
    /// then burn the requested amount.
    async fn ethereum_source_step(
        &self,
        transfer: &mut Transfer,
    ) -> Result<Receipt, BridgeError> {
        let request = transfer.request.clone();
        let balance = self.ethereum.read_balance(&request.eth_party).await?;

        if balance < request.amount {
            info!(
                "[bridge] balance {} below requested {}, minting remediation liquidity",
                balance, request.amount
            );
            transfer.transition_to(TransferState::SourceRemediation)?;

            let mint = EthereumOperation::mint(request.eth_party, request.amount)?;
            submit_and_finalize(self.ethereum.as_ref(), mint).await?;

            let after = self.ethereum.read_balance(&request.eth_party).await?;
            if after < request.amount {
                // One mint only; no burn was or will be submitted.
                return Err(BridgeError::InsufficientAfterRemediation {
                    requested: request.amount,
                    balance: after,
                });
            }
            transfer.transition_to(TransferState::SourceOperation)?;
        }

        let burn = EthereumOperation::burn(request.eth_party, request.amount)?;
        submit_and_finalize(self.ethereum.as_ref(), burn).await
    }

    /// Sui as source: pick one coin object and burn it for the bridge.
    ///
    /// No remediation policy on this side — deliberately asymmetric with
    /// the Ethereum source step.
    async fn sui_source_step(&self, request: &TransferRequest) -> Result<Receipt, BridgeError> {
        let units = self.sui.list_spendable_units(&request.sui_party).await?;
        let unit = select_spendable_unit(&units, request.amount)?;
        debug!(
            "[bridge] selected coin {} out of {} units",
            unit,
            units.len()
        );

        let burn = SuiOperation::burn_for_bridge(
            self.config.sui_admin_cap_id,
            unit,
            request.amount,
            request.eth_party,
        )?;
        submit_and_finalize(self.sui.as_ref(), burn).await
    }
}

/// Submit one operation and block until its outcome is known.
///
/// An ambiguous finality timeout triggers exactly one re-query; a receipt
/// recovered that way continues the transfer, an unresolved outcome is
/// surfaced as the timeout. The operation is never resubmitted.
async fn submit_and_finalize<L>(ledger: &L, op: L::Operation) -> Result<Receipt, BridgeError>
where
    L: LedgerAdapter + ?Sized,
{
    let handle = ledger.submit(op).await?;
    match ledger.await_finality(&handle).await {
        Ok(receipt) => Ok(receipt),
        Err(BridgeError::FinalityTimeout { .. }) => {
            warn!(
                "[bridge] finality timeout on {} for {}, re-querying outcome",
                handle.chain, handle.tx_id
            );
            match ledger.query_outcome(&handle).await? {
                Some(receipt) => Ok(receipt),
                None => Err(BridgeError::FinalityTimeout {
                    chain: handle.chain,
                    tx_id: handle.tx_id,
                }),
            }
        }
        Err(e) => Err(e),
    }
}

/// Attach the balance/approvals hint the UI shows for execution reverts.
fn friendly_detail(error: &BridgeError) -> String {
    let detail = error.to_string();
    if detail.contains("execution reverted") {
        format!("{detail}; check your token balance and approvals")
    } else {
        detail
    }
}

fn failed_outcome(error: BridgeError) -> TransferOutcome {
    TransferOutcome::Failed {
        kind: error.kind(),
        detail: friendly_detail(&error),
    }
}

#[async_trait]
impl<E, S> BridgeApi for TransferOrchestrator<E, S>
where
    E: LedgerAdapter<Address = EthAddress, Operation = EthereumOperation> + ChainInspector,
    S: LedgerAdapter<Address = SuiAddress, Operation = SuiOperation>
        + ChainInspector
        + SpendableUnitSource,
{
    async fn request_transfer(
        &self,
        direction: TransferDirection,
        amount: &str,
        eth_party: EthAddress,
        sui_party: SuiAddress,
    ) -> TransferOutcome {
        // The only decimal-to-base-unit conversion in the pipeline.
        let request = match Amount::parse_decimal(amount)
            .and_then(|amount| TransferRequest::new(direction, amount, eth_party, sui_party))
        {
            Ok(request) => request,
            Err(e) => return failed_outcome(e),
        };

        info!(
            "[bridge] transfer requested: {:?}, amount {}",
            direction, request.amount
        );
        let mut transfer = Transfer::new(request);

        match self.execute(&mut transfer).await {
            Ok(pair) => {
                info!(
                    "[bridge] transfer completed: source {}, destination {}",
                    pair.source.tx_id, pair.destination.tx_id
                );
                TransferOutcome::Completed(pair)
            }
            Err(failure) => {
                let _ = transfer.transition_to(TransferState::Failed);
                match failure.source_receipt {
                    Some(source_receipt) => {
                        warn!(
                            "[bridge] destination step failed after finalized source {}: {}; \
                             funds need manual intervention",
                            source_receipt.tx_id, failure.error
                        );
                        TransferOutcome::PartiallyCompleted {
                            source_receipt,
                            kind: failure.error.kind(),
                            detail: friendly_detail(&failure.error),
                        }
                    }
                    None => {
                        warn!("[bridge] transfer failed: {}", failure.error);
                        failed_outcome(failure.error)
                    }
                }
            }
        }
    }

    async fn mint_ethereum_test_tokens(
        &self,
        party: EthAddress,
        amount: &str,
    ) -> Result<Receipt, BridgeError> {
        let amount = Amount::parse_decimal(amount)?;
        let mint = EthereumOperation::mint(party, amount)?;
        info!("[bridge] minting {} test tokens for {}", amount, party);
        submit_and_finalize(self.ethereum.as_ref(), mint).await
    }

    async fn mint_sui_test_tokens(&self, party: SuiAddress) -> Result<Receipt, BridgeError> {
        let mint = SuiOperation::mint_bridged(
            self.config.sui_admin_cap_id,
            Amount::from_tokens(SUI_TEST_MINT_TOKENS),
            party,
            PLACEHOLDER_SOURCE_TX,
        )?;
        info!("[bridge] minting sui test allotment for {}", party);
        submit_and_finalize(self.sui.as_ref(), mint).await
    }
}

//! # Receipt Correlation
//!
//! Packages a finalized source-chain receipt into the payload the
//! destination chain expects. Pure functions, no I/O: identical inputs
//! produce identical payloads. Anything inconsistent fails fast as a
//! malformed receipt instead of being forwarded to a ledger adapter.

use crate::domain::invariants::invariant_source_tx_present;
use crate::domain::{
    Amount, BridgeError, ChainId, EthAddress, EthereumOperation, ObjectId, Receipt, SuiAddress,
    SuiOperation, TxHash,
};

/// Normalize an Ethereum transaction id into its 32-byte hash.
///
/// Accepts the 0x-prefixed or bare hex form the chain client returns;
/// rejects anything that is not exactly 32 bytes of hex.
pub fn normalize_eth_tx_hash(tx_id: &str) -> Result<TxHash, BridgeError> {
    let stripped = tx_id.strip_prefix("0x").unwrap_or(tx_id);
    let bytes = hex::decode(stripped)
        .map_err(|e| BridgeError::MalformedReceipt(format!("tx id {tx_id:?}: {e}")))?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        BridgeError::MalformedReceipt(format!("tx id {tx_id:?}: expected 32 bytes, got {len}"))
    })
}

/// Build the Sui bridged-mint payload from a finalized Ethereum burn.
pub fn correlate_to_sui(
    source: &Receipt,
    amount: Amount,
    admin_cap: ObjectId,
    recipient: SuiAddress,
) -> Result<SuiOperation, BridgeError> {
    if source.chain != ChainId::Ethereum {
        return Err(BridgeError::MalformedReceipt(format!(
            "expected an Ethereum receipt, got {}",
            source.chain
        )));
    }
    if source.amount != amount {
        return Err(BridgeError::MalformedReceipt(format!(
            "receipt finalized {} but transfer requested {}",
            source.amount, amount
        )));
    }
    let source_tx = normalize_eth_tx_hash(&source.tx_id)?;
    invariant_source_tx_present(&source_tx)?;
    SuiOperation::mint_bridged(admin_cap, amount, recipient, source_tx)
}

/// Build the Ethereum mint payload from a finalized Sui bridge burn.
///
/// The Ethereum side does not record the foreign digest, so only the
/// receipt's consistency is checked before the mint is shaped.
pub fn correlate_to_eth(
    source: &Receipt,
    amount: Amount,
    recipient: EthAddress,
) -> Result<EthereumOperation, BridgeError> {
    if source.chain != ChainId::Sui {
        return Err(BridgeError::MalformedReceipt(format!(
            "expected a Sui receipt, got {}",
            source.chain
        )));
    }
    if source.amount != amount {
        return Err(BridgeError::MalformedReceipt(format!(
            "receipt finalized {} but transfer requested {}",
            source.amount, amount
        )));
    }
    if source.tx_id.trim().is_empty() {
        return Err(BridgeError::MalformedReceipt(
            "sui receipt carries no digest".to_string(),
        ));
    }
    EthereumOperation::mint(recipient, amount)
}

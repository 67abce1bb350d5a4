//! # Domain Invariants
//!
//! Business rules every transfer must satisfy.

use super::entities::Receipt;
use super::errors::{BridgeError, TxHash};
use super::value_objects::Amount;

/// Invariant: transfer amounts are strictly positive.
pub fn invariant_positive_amount(amount: Amount) -> Result<(), BridgeError> {
    if amount.is_zero() {
        return Err(BridgeError::InvalidAmount {
            input: amount.to_string(),
            reason: "amount must be greater than zero".to_string(),
        });
    }
    Ok(())
}

/// Invariant: the destination receipt credits exactly what the source
/// receipt finalized. A mismatch means a protocol-level bug.
pub fn invariant_receipt_amounts_match(
    source: &Receipt,
    destination: &Receipt,
) -> Result<(), BridgeError> {
    if source.amount != destination.amount {
        return Err(BridgeError::MalformedReceipt(format!(
            "amount mismatch: source {} finalized {}, destination {} finalized {}",
            source.chain, source.amount, destination.chain, destination.amount
        )));
    }
    Ok(())
}

/// Invariant: a bridged mint must reference a real source transaction.
pub fn invariant_source_tx_present(source_tx: &TxHash) -> Result<(), BridgeError> {
    if source_tx.iter().all(|b| *b == 0) {
        return Err(BridgeError::MalformedReceipt(
            "source transaction hash is all zeros".to_string(),
        ));
    }
    Ok(())
}

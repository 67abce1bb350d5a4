//! # Coin Selection
//!
//! Picks the single coin object that will be consumed by a Sui-side bridge
//! burn. First-fit over a stable ordering, deliberately simple and auditable
//! rather than optimal. Coins are never merged here: a fragmented balance
//! whose sum would suffice is an actionable error for the caller.

use crate::domain::{Amount, BridgeError, ObjectId, SpendableUnit};

/// Select the first coin (ordered by ascending object id) whose balance
/// covers `required`.
///
/// The ordering makes selection reproducible: the same unit set and amount
/// always yield the same coin.
pub fn select_spendable_unit(
    units: &[SpendableUnit],
    required: Amount,
) -> Result<ObjectId, BridgeError> {
    let mut ordered: Vec<&SpendableUnit> = units.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    for unit in &ordered {
        if unit.balance >= required {
            return Ok(unit.id);
        }
    }

    let largest = ordered
        .iter()
        .map(|u| u.balance)
        .max()
        .unwrap_or(Amount::zero());
    let total = ordered
        .iter()
        .try_fold(Amount::zero(), |acc, u| acc.checked_add(u.balance))
        .unwrap_or(Amount::zero());

    Err(BridgeError::NoCoinSufficient {
        required,
        largest,
        total,
        unit_count: ordered.len(),
    })
}

//! # Operation Payloads
//!
//! Tagged, validated payload types for every chain operation the bridge can
//! submit. Payloads are validated at construction, not at the chain
//! boundary — a ledger adapter never receives a loose byte/number blob.

use super::errors::{BridgeError, TxHash};
use super::invariants::invariant_positive_amount;
use super::value_objects::{Amount, EthAddress, ObjectId, SuiAddress};
use serde::{Deserialize, Serialize};

/// All-zero source-transaction placeholder used when minting test liquidity
/// on Sui outside a real bridge transfer.
pub const PLACEHOLDER_SOURCE_TX: TxHash = [0u8; 32];

/// Token operation on the Ethereum ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EthereumOperation {
    /// Owner-authorized mint to an account.
    Mint {
        /// Credited account.
        to: EthAddress,
        /// Minted amount.
        amount: Amount,
    },
    /// Burn from an account.
    Burn {
        /// Debited account.
        from: EthAddress,
        /// Burned amount.
        amount: Amount,
    },
}

impl EthereumOperation {
    /// Build a mint payload.
    pub fn mint(to: EthAddress, amount: Amount) -> Result<Self, BridgeError> {
        invariant_positive_amount(amount)?;
        Ok(EthereumOperation::Mint { to, amount })
    }

    /// Build a burn payload.
    pub fn burn(from: EthAddress, amount: Amount) -> Result<Self, BridgeError> {
        invariant_positive_amount(amount)?;
        Ok(EthereumOperation::Burn { from, amount })
    }

    /// Amount moved by this operation.
    pub fn amount(&self) -> Amount {
        match self {
            EthereumOperation::Mint { amount, .. } | EthereumOperation::Burn { amount, .. } => {
                *amount
            }
        }
    }
}

/// Token operation on the Sui ledger.
///
/// Both variants carry the privileged capability by identifier only; the
/// ledger adapter is responsible for authorization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuiOperation {
    /// `ibt_token::mint_bridged_tokens` — credit bridged liquidity, tagged
    /// with the finalized source transaction.
    MintBridged {
        /// AdminCap object id authorizing the mint.
        admin_cap: ObjectId,
        /// Minted amount.
        amount: Amount,
        /// Credited account.
        recipient: SuiAddress,
        /// Normalized 32-byte source transaction hash
        /// ([`PLACEHOLDER_SOURCE_TX`] for test liquidity).
        source_tx: TxHash,
    },
    /// `ibt_token::burn_for_bridge` — consume one coin object, recording the
    /// foreign recipient.
    BurnForBridge {
        /// AdminCap object id authorizing the burn.
        admin_cap: ObjectId,
        /// The coin object consumed. The whole object is spent.
        unit: ObjectId,
        /// Declared bridged amount (the selected unit must cover it).
        amount: Amount,
        /// Recipient account on the Ethereum side.
        eth_recipient: EthAddress,
    },
}

impl SuiOperation {
    /// Build a bridged-mint payload.
    pub fn mint_bridged(
        admin_cap: ObjectId,
        amount: Amount,
        recipient: SuiAddress,
        source_tx: TxHash,
    ) -> Result<Self, BridgeError> {
        invariant_positive_amount(amount)?;
        Ok(SuiOperation::MintBridged {
            admin_cap,
            amount,
            recipient,
            source_tx,
        })
    }

    /// Build a bridge-burn payload.
    pub fn burn_for_bridge(
        admin_cap: ObjectId,
        unit: ObjectId,
        amount: Amount,
        eth_recipient: EthAddress,
    ) -> Result<Self, BridgeError> {
        invariant_positive_amount(amount)?;
        Ok(SuiOperation::BurnForBridge {
            admin_cap,
            unit,
            amount,
            eth_recipient,
        })
    }

    /// Amount moved by this operation.
    pub fn amount(&self) -> Amount {
        match self {
            SuiOperation::MintBridged { amount, .. }
            | SuiOperation::BurnForBridge { amount, .. } => *amount,
        }
    }
}

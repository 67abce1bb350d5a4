//! # Inbound Ports
//!
//! The API the bridge core exposes to its caller (typically a UI). A
//! request/response protocol over in-process calls; no wire format.

use crate::domain::{EthAddress, Receipt, SuiAddress, TransferDirection, TransferOutcome};
use crate::domain::errors::BridgeError;
use async_trait::async_trait;

/// Bridge API - inbound port.
#[async_trait]
pub trait BridgeApi: Send + Sync {
    /// Run one transfer end to end.
    ///
    /// `amount` is the human-entered decimal string; conversion to base
    /// units happens exactly once, here at the boundary. Every failure
    /// mode is folded into the returned [`TransferOutcome`].
    async fn request_transfer(
        &self,
        direction: TransferDirection,
        amount: &str,
        eth_party: EthAddress,
        sui_party: SuiAddress,
    ) -> TransferOutcome;

    /// Mint test liquidity on the Ethereum side (owner mint).
    async fn mint_ethereum_test_tokens(
        &self,
        party: EthAddress,
        amount: &str,
    ) -> Result<Receipt, BridgeError>;

    /// Mint the fixed test allotment on the Sui side, tagged with the
    /// all-zero placeholder source hash.
    async fn mint_sui_test_tokens(&self, party: SuiAddress) -> Result<Receipt, BridgeError>;
}

//! Shared fixtures for the integration tests.

use ibt_bridge::{
    BridgeConfig, EthAddress, InMemoryEthereumLedger, InMemorySuiLedger, ObjectId, SuiAddress,
    TransferOrchestrator,
};
use std::sync::{Arc, Once};

/// The party's Ethereum account; also the contract owner so remediation
/// mints are authorized, as with the original deployer wallet.
pub const ETH_PARTY: EthAddress = EthAddress([0x0Au8; 20]);
/// The party's Sui account.
pub const SUI_PARTY: SuiAddress = SuiAddress([0xBBu8; 32]);

static INIT_TRACING: Once = Once::new();

/// Route bridge logs through `RUST_LOG` when tests run with --nocapture.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A wired bridge: orchestrator plus direct handles on both ledgers.
pub struct Bridge {
    /// Orchestrator under test.
    pub orchestrator: TransferOrchestrator<InMemoryEthereumLedger, InMemorySuiLedger>,
    /// Ethereum ledger handle for seeding and assertions.
    pub ethereum: Arc<InMemoryEthereumLedger>,
    /// Sui ledger handle for seeding and assertions.
    pub sui: Arc<InMemorySuiLedger>,
}

/// Build a bridge over freshly deployed in-memory chains.
pub fn bridge() -> Bridge {
    init_tracing();

    let config = BridgeConfig::new(
        EthAddress([0x01u8; 20]),
        ObjectId([0x22u8; 32]),
        ObjectId([0x33u8; 32]),
        ObjectId([0x44u8; 32]),
        "sui:devnet",
    );
    let ethereum = Arc::new(InMemoryEthereumLedger::new(
        config.ethereum_contract,
        ETH_PARTY,
        ETH_PARTY,
    ));
    let sui = Arc::new(InMemorySuiLedger::new(
        config.sui_package_id,
        config.sui_admin_cap_id,
    ));
    let orchestrator =
        TransferOrchestrator::new(config, Arc::clone(&ethereum), Arc::clone(&sui))
            .expect("valid fixture config");

    Bridge {
        orchestrator,
        ethereum,
        sui,
    }
}

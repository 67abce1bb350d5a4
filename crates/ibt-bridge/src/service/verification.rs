//! # Verification Stage
//!
//! Pre-flight check that both chains' bridge resources exist and are
//! reachable before any value-affecting operation is submitted. The two
//! probes touch unrelated chains and run concurrently; both must pass.
//!
//! Non-transactional: state may change between verification and the
//! following operation. That race is accepted and surfaces as the chain
//! operation failing naturally.

use crate::domain::VerificationReport;
use crate::ports::outbound::ChainInspector;
use tracing::info;

/// Probe both chain sides. Never cached; recomputed per transfer attempt.
pub async fn verify_bridge_setup<E, S>(ethereum: &E, sui: &S) -> VerificationReport
where
    E: ChainInspector,
    S: ChainInspector,
{
    let (ethereum, sui) = tokio::join!(ethereum.verify_setup(), sui.verify_setup());

    info!(
        "[bridge] verification: ethereum ok={}, sui ok={}",
        ethereum.ok, sui.ok
    );

    VerificationReport { ethereum, sui }
}

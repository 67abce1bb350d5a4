//! Failing transfers: gating, fragmentation, exhausted remediation, and
//! the partial-completion report.

use crate::support::{bridge, ETH_PARTY, SUI_PARTY};
use ibt_bridge::{
    Amount, BridgeApi, BridgeConfig, ErrorKind, EthAddress, EthereumOperation,
    InMemoryEthereumLedger, InMemorySuiLedger, LedgerAdapter, ObjectId, TransferDirection,
    TransferOrchestrator, TransferOutcome,
};
use std::sync::Arc;

fn assert_failed_with(outcome: &TransferOutcome, expected: ErrorKind) {
    match outcome {
        TransferOutcome::Failed { kind, .. } => assert_eq!(*kind, expected),
        other => panic!("expected Failed({expected:?}), got {other:?}"),
    }
}

#[tokio::test]
async fn test_verification_gating_leaves_both_chains_untouched() {
    let bridge = bridge();
    bridge.ethereum.credit(ETH_PARTY, Amount::from_tokens(25));
    bridge.sui.remove_package();

    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::EthereumToSui, "10", ETH_PARTY, SUI_PARTY)
        .await;
    assert_failed_with(&outcome, ErrorKind::VerificationFailed);

    // Read-back: nothing was minted, burned, or locked on either chain.
    assert_eq!(
        bridge.ethereum.read_balance(&ETH_PARTY).await.unwrap(),
        Amount::from_tokens(25)
    );
    assert!(bridge.ethereum.finalized_operations().is_empty());
    assert!(bridge.sui.finalized_operations().is_empty());
}

#[tokio::test]
async fn test_verification_failure_carries_both_sides_detail() {
    let bridge = bridge();
    bridge.sui.remove_admin_cap();

    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::SuiToEthereum, "1", ETH_PARTY, SUI_PARTY)
        .await;
    let TransferOutcome::Failed { kind, detail } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(kind, ErrorKind::VerificationFailed);
    assert!(detail.contains("AdminCap"));
}

#[tokio::test]
async fn test_fragmented_coins_are_not_merged() {
    let bridge = bridge();
    // 5 + 3 = 8 would cover the request, but no single coin does.
    bridge.sui.seed_coin(SUI_PARTY, Amount::from_tokens(5));
    bridge.sui.seed_coin(SUI_PARTY, Amount::from_tokens(3));

    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::SuiToEthereum, "8", ETH_PARTY, SUI_PARTY)
        .await;

    let TransferOutcome::Failed { kind, detail } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(kind, ErrorKind::NoCoinSufficient);
    assert!(detail.contains("merge coins"));

    // Both coins survive, nothing reached Ethereum.
    assert_eq!(
        bridge.sui.read_balance(&SUI_PARTY).await.unwrap(),
        Amount::from_tokens(8)
    );
    assert!(bridge.ethereum.finalized_operations().is_empty());
}

#[tokio::test]
async fn test_insufficient_after_remediation_never_burns() {
    let bridge = bridge();
    // The one permitted mint only credits 4 of the requested 10.
    bridge.ethereum.set_mint_cap(Some(Amount::from_tokens(4)));

    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::EthereumToSui, "10", ETH_PARTY, SUI_PARTY)
        .await;
    assert_failed_with(&outcome, ErrorKind::InsufficientAfterRemediation);

    // Exactly one mint was attempted; no burn was ever submitted.
    let ops = bridge.ethereum.finalized_operations();
    assert_eq!(ops.len(), 1);
    assert!(matches!(ops[0], EthereumOperation::Mint { .. }));
    assert_eq!(
        bridge.ethereum.read_balance(&ETH_PARTY).await.unwrap(),
        Amount::from_tokens(4)
    );
    assert!(bridge.sui.finalized_operations().is_empty());
}

#[tokio::test]
async fn test_unresolved_destination_timeout_reports_partial_completion() {
    let bridge = bridge();
    bridge.ethereum.credit(ETH_PARTY, Amount::from_tokens(10));
    // The Sui mint's outcome stays unknown even after the re-query.
    bridge.sui.set_finality_timeout(true);

    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::EthereumToSui, "10", ETH_PARTY, SUI_PARTY)
        .await;

    let TransferOutcome::PartiallyCompleted {
        source_receipt,
        kind,
        ..
    } = outcome
    else {
        panic!("expected partial completion, got {outcome:?}");
    };
    assert_eq!(kind, ErrorKind::FinalityTimeout);
    assert_eq!(source_receipt.amount, Amount::from_tokens(10));
    // The burn is final; the bridge does not attempt a rollback.
    assert_eq!(
        bridge.ethereum.read_balance(&ETH_PARTY).await.unwrap(),
        Amount::zero()
    );
}

#[tokio::test]
async fn test_unresolved_source_timeout_fails_before_destination() {
    let bridge = bridge();
    bridge.ethereum.credit(ETH_PARTY, Amount::from_tokens(10));
    bridge.ethereum.set_finality_timeout(true);

    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::EthereumToSui, "10", ETH_PARTY, SUI_PARTY)
        .await;

    // No source receipt exists, so this is a total failure, and the
    // destination chain never saw an operation.
    assert_failed_with(&outcome, ErrorKind::FinalityTimeout);
    assert!(bridge.sui.finalized_operations().is_empty());
}

#[tokio::test]
async fn test_rejected_sui_burn_surfaces_reason_verbatim() {
    let bridge = bridge();
    bridge.sui.seed_coin(SUI_PARTY, Amount::from_tokens(10));
    bridge
        .sui
        .reject_next_submission("execution reverted: bridge paused");

    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::SuiToEthereum, "8", ETH_PARTY, SUI_PARTY)
        .await;

    let TransferOutcome::Failed { kind, detail } = outcome else {
        panic!("expected failure");
    };
    assert_eq!(kind, ErrorKind::SubmissionRejected);
    assert!(detail.contains("execution reverted: bridge paused"));
    assert!(detail.contains("check your token balance and approvals"));
    assert!(bridge.ethereum.finalized_operations().is_empty());
}

#[tokio::test]
async fn test_invalid_config_rejected_at_construction() {
    let config = BridgeConfig::new(
        EthAddress([0u8; 20]),
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

    let err = TransferOrchestrator::new(config, ethereum, sui).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

//! Transfers that complete: both directions, remediation, timeout recovery.

use crate::support::{bridge, ETH_PARTY, SUI_PARTY};
use ibt_bridge::{
    Amount, BridgeApi, EthereumOperation, LedgerAdapter, SpendableUnitSource, TransferDirection,
    TransferOutcome,
};

#[tokio::test]
async fn test_eth_to_sui_remediates_empty_balance() {
    let bridge = bridge();
    // Source balance is zero: the orchestrator mints 10, burns 10, and the
    // destination mint credits 10.
    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::EthereumToSui, "10", ETH_PARTY, SUI_PARTY)
        .await;

    let TransferOutcome::Completed(pair) = outcome else {
        panic!("expected completion, got {outcome:?}");
    };
    assert_eq!(pair.source.amount, Amount::from_tokens(10));
    assert_eq!(pair.destination.amount, Amount::from_tokens(10));

    let ops = bridge.ethereum.finalized_operations();
    assert_eq!(ops.len(), 2, "exactly one mint then one burn: {ops:?}");
    assert!(matches!(ops[0], EthereumOperation::Mint { amount, .. } if amount == Amount::from_tokens(10)));
    assert!(matches!(ops[1], EthereumOperation::Burn { amount, .. } if amount == Amount::from_tokens(10)));

    assert_eq!(
        bridge.ethereum.read_balance(&ETH_PARTY).await.unwrap(),
        Amount::zero()
    );
    assert_eq!(
        bridge.sui.read_balance(&SUI_PARTY).await.unwrap(),
        Amount::from_tokens(10)
    );
}

#[tokio::test]
async fn test_eth_to_sui_skips_remediation_when_funded() {
    let bridge = bridge();
    bridge.ethereum.credit(ETH_PARTY, Amount::from_tokens(25));

    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::EthereumToSui, "10", ETH_PARTY, SUI_PARTY)
        .await;
    assert!(outcome.is_completed());

    // No mint: the only finalized source operation is the burn.
    let ops = bridge.ethereum.finalized_operations();
    assert_eq!(ops.len(), 1);
    assert!(matches!(ops[0], EthereumOperation::Burn { .. }));
    assert_eq!(
        bridge.ethereum.read_balance(&ETH_PARTY).await.unwrap(),
        Amount::from_tokens(15)
    );
}

#[tokio::test]
async fn test_eth_to_sui_fractional_amount_is_exact() {
    let bridge = bridge();
    bridge.ethereum.credit(ETH_PARTY, Amount::from_tokens(1));

    let outcome = bridge
        .orchestrator
        .request_transfer(
            TransferDirection::EthereumToSui,
            "0.000000000000000001",
            ETH_PARTY,
            SUI_PARTY,
        )
        .await;

    let TransferOutcome::Completed(pair) = outcome else {
        panic!("expected completion, got {outcome:?}");
    };
    // One base unit survives the whole pipeline unchanged.
    assert_eq!(pair.destination.amount.to_string(), "0.000000000000000001");
}

#[tokio::test]
async fn test_sui_to_eth_selects_covering_coin() {
    let bridge = bridge();
    for tokens in [5u64, 12, 3] {
        bridge.sui.seed_coin(SUI_PARTY, Amount::from_tokens(tokens));
    }

    let units = bridge.sui.list_spendable_units(&SUI_PARTY).await.unwrap();
    let expected = units
        .iter()
        .find(|u| u.balance >= Amount::from_tokens(8))
        .expect("one coin covers 8")
        .id;

    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::SuiToEthereum, "8", ETH_PARTY, SUI_PARTY)
        .await;
    assert!(outcome.is_completed(), "got {outcome:?}");

    // The selected coin is consumed whole; the others are untouched.
    let remaining = bridge.sui.list_spendable_units(&SUI_PARTY).await.unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|u| u.id != expected));

    assert_eq!(
        bridge.ethereum.read_balance(&ETH_PARTY).await.unwrap(),
        Amount::from_tokens(8)
    );
}

#[tokio::test]
async fn test_round_trip_restores_sui_balance() {
    let bridge = bridge();
    bridge.ethereum.credit(ETH_PARTY, Amount::from_tokens(10));

    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::EthereumToSui, "10", ETH_PARTY, SUI_PARTY)
        .await;
    assert!(outcome.is_completed());

    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::SuiToEthereum, "10", ETH_PARTY, SUI_PARTY)
        .await;
    assert!(outcome.is_completed());

    assert_eq!(
        bridge.ethereum.read_balance(&ETH_PARTY).await.unwrap(),
        Amount::from_tokens(10)
    );
    assert_eq!(
        bridge.sui.read_balance(&SUI_PARTY).await.unwrap(),
        Amount::zero()
    );
}

#[tokio::test]
async fn test_destination_timeout_recovered_by_requery() {
    let bridge = bridge();
    bridge.ethereum.credit(ETH_PARTY, Amount::from_tokens(10));
    // The Sui mint's confirmation times out, but a re-query finds it
    // finalized; the transfer completes without a duplicate submission.
    bridge.sui.set_finality_timeout(true);
    bridge.sui.set_finalize_on_query(true);

    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::EthereumToSui, "10", ETH_PARTY, SUI_PARTY)
        .await;
    assert!(outcome.is_completed(), "got {outcome:?}");

    assert_eq!(bridge.sui.finalized_operations().len(), 1);
    assert_eq!(
        bridge.sui.read_balance(&SUI_PARTY).await.unwrap(),
        Amount::from_tokens(10)
    );
}

#[tokio::test]
async fn test_sui_test_allotment_feeds_a_transfer() {
    let bridge = bridge();

    let receipt = bridge
        .orchestrator
        .mint_sui_test_tokens(SUI_PARTY)
        .await
        .unwrap();
    assert_eq!(receipt.amount, Amount::from_tokens(1000));

    let outcome = bridge
        .orchestrator
        .request_transfer(TransferDirection::SuiToEthereum, "1000", ETH_PARTY, SUI_PARTY)
        .await;
    assert!(outcome.is_completed());
    assert_eq!(
        bridge.ethereum.read_balance(&ETH_PARTY).await.unwrap(),
        Amount::from_tokens(1000)
    );
}

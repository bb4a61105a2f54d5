// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for transfer log fetching
//!
//! Drives [`LogFetcher`] against an in-memory network and checks filtering,
//! range validation, decoding and normalization end to end.

mod helpers;

use alloy_primitives::{address, Address, Bytes, B256, U256};
use erc20_relay::{
    FetchError, LogFetcher, NetworkEntry, NetworkRegistry, RegistryError, RelayConfig,
    RelayConfigBuilder, RpcError,
};
use helpers::{transfer_log, transfer_topic, MockNetwork};

const USDT: Address = address!("0xdac17f958d2ee523a2206206994597c13d831ec7");
const ALICE: Address = address!("0x1111111111111111111111111111111111111111");
const BOB: Address = address!("0x2222222222222222222222222222222222222222");

fn fetcher(network: MockNetwork) -> LogFetcher<MockNetwork> {
    LogFetcher::new(network, NetworkRegistry::usdt(), RelayConfig::default()).unwrap()
}

#[tokio::test]
async fn test_transfer_value_is_scaled_by_token_decimals() {
    helpers::init_tracing();
    let network = MockNetwork::new().with_logs(vec![transfer_log(
        USDT,
        ALICE,
        BOB,
        U256::from(100_000_000u64),
        8_965_691,
        3,
    )]);
    let fetcher = fetcher(network);

    let events = fetcher.fetch(1, 8_965_690, 8_965_695).await.unwrap();
    assert_eq!(events.len(), 1);

    let event = &events[0];
    assert_eq!(event.event_name, "Transfer");
    assert_eq!(event.block_number, 8_965_691);
    assert_eq!(event.log_index, 3);
    assert_eq!(event.contract, "0xdAC17F958D2ee523a2206206994597C13D831ec7");
    assert_eq!(
        event.raw_values.get("value").and_then(|v| v.as_uint()),
        Some(U256::from(100_000_000u64))
    );
    assert_eq!(
        event.values.get("value").and_then(|v| v.as_amount()),
        Some("100")
    );
    assert_eq!(
        event.raw_values.get("from").and_then(|v| v.as_address()),
        Some(ALICE)
    );
    assert_eq!(
        event.raw_values.get("to").and_then(|v| v.as_address()),
        Some(BOB)
    );
}

#[tokio::test]
async fn test_decoded_event_json_shape() {
    let network = MockNetwork::new().with_logs(vec![transfer_log(
        USDT,
        ALICE,
        BOB,
        U256::from(1u64),
        8_965_690,
        0,
    )]);
    let events = fetcher(network).fetch(1, 8_965_690, 8_965_690).await.unwrap();

    let json = serde_json::to_value(&events[0]).unwrap();
    for key in [
        "txHash",
        "logIndex",
        "blockNumber",
        "blockHash",
        "contract",
        "eventName",
        "topics",
        "rawValues",
        "values",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["values"]["value"], "0.000001");
    assert_eq!(json["rawValues"]["value"], "1");

    let raw_keys: Vec<_> = json["rawValues"].as_object().unwrap().keys().cloned().collect();
    assert!(raw_keys.iter().all(|k| !k.chars().all(|c| c.is_ascii_digit())));
}

#[tokio::test]
async fn test_events_stay_in_requested_range_and_order() {
    let logs = (8_965_688..=8_965_697)
        .enumerate()
        .map(|(i, block)| transfer_log(USDT, ALICE, BOB, U256::from(i + 1), block, i as u64))
        .collect();
    let network = MockNetwork::new().with_logs(logs);
    let events = fetcher(network).fetch(1, 8_965_690, 8_965_695).await.unwrap();

    assert_eq!(events.len(), 6);
    assert!(events
        .iter()
        .all(|e| (8_965_690..=8_965_695).contains(&e.block_number)));
    assert!(events.windows(2).all(|w| w[0].block_number <= w[1].block_number));
    assert!(events.iter().all(|e| e.event_name == "Transfer"));
}

#[tokio::test]
async fn test_empty_result_is_not_an_error() {
    let events = fetcher(MockNetwork::new())
        .fetch(1, 8_965_690, 8_965_695)
        .await
        .unwrap();
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_foreign_contract_and_other_events_are_filtered() {
    let other_contract = address!("0x3333333333333333333333333333333333333333");
    let mut approval = transfer_log(USDT, ALICE, BOB, U256::from(5u64), 8_965_690, 1);
    approval.topics[0] = B256::repeat_byte(0x42);

    let network = MockNetwork::new().with_logs(vec![
        transfer_log(other_contract, ALICE, BOB, U256::from(5u64), 8_965_690, 0),
        approval,
        transfer_log(USDT, ALICE, BOB, U256::from(7u64), 8_965_690, 2),
    ]);
    let batch = fetcher(network)
        .fetch_with_report(1, 8_965_690, 8_965_690)
        .await
        .unwrap();

    assert_eq!(batch.events.len(), 1);
    assert_eq!(batch.events[0].log_index, 2);
    assert!(batch.skipped.is_empty());
}

#[tokio::test]
async fn test_malformed_log_is_skipped_not_fatal() {
    let mut truncated = transfer_log(USDT, ALICE, BOB, U256::from(9u64), 8_965_690, 0);
    truncated.data = Bytes::from(vec![0u8; 31]);
    let mut missing_topic = transfer_log(USDT, ALICE, BOB, U256::from(9u64), 8_965_690, 1);
    missing_topic.topics.pop();

    let network = MockNetwork::new().with_logs(vec![
        truncated,
        missing_topic,
        transfer_log(USDT, ALICE, BOB, U256::from(9u64), 8_965_690, 2),
    ]);
    let batch = fetcher(network)
        .fetch_with_report(1, 8_965_690, 8_965_690)
        .await
        .unwrap();

    assert_eq!(batch.events.len(), 1);
    assert_eq!(batch.skipped.len(), 2);
    assert_eq!(batch.skipped[0].log_index, Some(0));
    assert_eq!(batch.skipped[1].log_index, Some(1));
    assert!(!batch.skipped[0].reason.is_empty());
}

#[tokio::test]
async fn test_pending_log_is_skipped() {
    let mut pending = transfer_log(USDT, ALICE, BOB, U256::from(9u64), 8_965_690, 0);
    pending.block_number = None;
    pending.block_hash = None;

    let batch = fetcher(MockNetwork::new().with_logs(vec![pending]))
        .fetch_with_report(1, 8_965_690, 8_965_690)
        .await
        .unwrap();
    assert!(batch.events.is_empty());
    assert_eq!(batch.skipped.len(), 1);
}

#[tokio::test]
async fn test_invalid_range_is_rejected_before_query() {
    let fetcher = fetcher(MockNetwork::new());
    let err = fetcher.fetch(1, 8_965_695, 8_965_690).await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::InvalidRange {
            from_block: 8_965_695,
            to_block: 8_965_690
        }
    ));
}

#[tokio::test]
async fn test_range_too_large() {
    let network = MockNetwork::new();
    let fetcher = LogFetcher::new(
        network,
        NetworkRegistry::usdt(),
        RelayConfigBuilder::with_defaults().max_block_range(10).build(),
    )
    .unwrap();

    assert!(fetcher.fetch(1, 5_000_000, 5_000_009).await.is_ok());
    let err = fetcher.fetch(1, 5_000_000, 5_000_010).await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::RangeTooLarge {
            requested: 11,
            max: 10
        }
    ));
}

#[tokio::test]
async fn test_per_chain_range_override() {
    let config = RelayConfigBuilder::with_defaults()
        .max_block_range(10)
        .chain_max_blocks(1, 100)
        .build();
    let fetcher = LogFetcher::new(MockNetwork::new(), NetworkRegistry::usdt(), config).unwrap();
    assert!(fetcher.fetch(1, 5_000_000, 5_000_099).await.is_ok());
    assert!(matches!(
        fetcher.fetch(3, 7_000_000, 7_000_010).await,
        Err(FetchError::RangeTooLarge { max: 10, .. })
    ));
}

#[tokio::test]
async fn test_unsupported_chain() {
    let fetcher = fetcher(MockNetwork::new());
    let err = fetcher.fetch(999, 1, 2).await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::Registry(RegistryError::UnsupportedNetwork { chain_id: 999 })
    ));
}

#[tokio::test]
async fn test_origin_clamp_query_bounds() {
    let registry = NetworkRegistry::new([NetworkEntry::new(1, USDT, 1_000)]).unwrap();
    let network = std::sync::Arc::new(MockNetwork::new());
    let fetcher = LogFetcher::new(network.clone(), registry, RelayConfig::default()).unwrap();

    fetcher.fetch(1, 990, 1_010).await.unwrap();
    assert_eq!(
        network.log_queries.lock().unwrap().as_slice(),
        &[(USDT, 1_000, 1_010)]
    );

    // Entirely before deployment: no query at all.
    let events = fetcher.fetch(1, 900, 999).await.unwrap();
    assert!(events.is_empty());
    assert_eq!(network.log_query_count(), 1);
}

#[tokio::test]
async fn test_network_failure_is_surfaced() {
    let fetcher = fetcher(MockNetwork::new().with_failing_logs());
    let err = fetcher.fetch(1, 8_965_690, 8_965_695).await.unwrap_err();
    assert!(matches!(err, FetchError::Rpc(RpcError::GetLogsFailed { .. })));
}

#[test]
fn test_transfer_topic_matches_signature_hash() {
    let fetcher = fetcher(MockNetwork::new());
    assert_eq!(fetcher.transfer_topic(), transfer_topic());
}

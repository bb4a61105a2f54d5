// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transfer log retrieval and decoding.

use alloy_primitives::{Address, BlockNumber, B256};
use tracing::{debug, info, warn, Instrument};

use crate::abi::{ContractInterface, DecodedFields};
use crate::config::RelayConfig;
use crate::errors::{AbiError, FetchError, RpcError};
use crate::network::{NetworkClient, RawLog};
use crate::normalize::{is_synthetic_key, normalize_values};
use crate::registry::NetworkRegistry;
use crate::spans;
use crate::types::config::MaxBlockRange;

use super::{DecodedEvent, SkippedLog, TransferBatch};

const TRANSFER_EVENT: &str = "Transfer";

/// Fetches `Transfer` events of the registered token contract and decodes
/// them into [`DecodedEvent`] records.
///
/// Ranges are never split: a request wider than the configured
/// [`MaxBlockRange`] is refused, leaving chunking to
/// the caller.
///
/// # Examples
///
/// ```rust,ignore
/// use erc20_relay::{LogFetcher, NetworkRegistry, RelayConfig};
/// use erc20_relay::provider::{create_http_network, ProviderConfig};
///
/// let network = create_http_network(ProviderConfig::infura(&project_id, "mainnet"))?;
/// let fetcher = LogFetcher::new(network, NetworkRegistry::usdt(), RelayConfig::default())?;
///
/// for event in fetcher.fetch(1, 8_965_690, 8_965_695).await? {
///     println!("{}", serde_json::to_string(&event)?);
/// }
/// ```
pub struct LogFetcher<N> {
    network: N,
    registry: NetworkRegistry,
    interface: ContractInterface,
    config: RelayConfig,
    transfer_topic: B256,
}

impl<N: NetworkClient> LogFetcher<N> {
    /// Create a fetcher for the standard ERC-20 interface.
    pub fn new(
        network: N,
        registry: NetworkRegistry,
        config: RelayConfig,
    ) -> Result<Self, AbiError> {
        Self::with_interface(network, registry, ContractInterface::erc20()?, config)
    }

    /// Create a fetcher for a custom interface that declares a `Transfer` event.
    ///
    /// # Errors
    ///
    /// [`AbiError::UnknownEvent`] if `interface` has no `Transfer` event.
    pub fn with_interface(
        network: N,
        registry: NetworkRegistry,
        interface: ContractInterface,
        config: RelayConfig,
    ) -> Result<Self, AbiError> {
        let transfer_topic = interface.event_topic(TRANSFER_EVENT)?;
        Ok(Self {
            network,
            registry,
            interface,
            config,
            transfer_topic,
        })
    }

    /// Topic used to recognise transfer logs.
    pub fn transfer_topic(&self) -> B256 {
        self.transfer_topic
    }

    /// Fetch and decode transfers in the inclusive range `[from_block, to_block]`.
    ///
    /// Logs that fail to decode are dropped with a warning; use
    /// [`fetch_with_report`](Self::fetch_with_report) to inspect them.
    pub async fn fetch(
        &self,
        chain_id: u64,
        from_block: BlockNumber,
        to_block: BlockNumber,
    ) -> Result<Vec<DecodedEvent>, FetchError> {
        Ok(self
            .fetch_with_report(chain_id, from_block, to_block)
            .await?
            .events)
    }

    /// Like [`fetch`](Self::fetch), also returning the logs that were skipped.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Registry`] if `chain_id` is not registered
    /// - [`FetchError::InvalidRange`] if `from_block > to_block`
    /// - [`FetchError::RangeTooLarge`] if the range exceeds the chain's limit
    /// - [`FetchError::Rpc`] if the log query fails
    pub async fn fetch_with_report(
        &self,
        chain_id: u64,
        from_block: BlockNumber,
        to_block: BlockNumber,
    ) -> Result<TransferBatch, FetchError> {
        let entry = self.registry.resolve(chain_id)?;

        if from_block > to_block {
            return Err(FetchError::InvalidRange {
                from_block,
                to_block,
            });
        }
        let max_block_range = self.config.get_max_block_range(chain_id);
        if !max_block_range.allows(from_block, to_block) {
            return Err(FetchError::RangeTooLarge {
                requested: MaxBlockRange::span(from_block, to_block),
                max: max_block_range.as_u64(),
            });
        }

        let contract = entry.contract_address;
        let span = spans::fetch_transfers(chain_id, contract, from_block, to_block);

        async move {
            if to_block < entry.origin_block {
                debug!(
                    origin_block = entry.origin_block,
                    "Range ends before contract deployment, nothing to fetch"
                );
                return Ok(TransferBatch::default());
            }
            let from_block = from_block.max(entry.origin_block);

            let logs = self
                .network
                .get_logs(contract, from_block, to_block)
                .await
                .map_err(|e| {
                    RpcError::get_logs_failed(
                        format!("{TRANSFER_EVENT} logs {from_block}-{to_block}"),
                        e,
                    )
                })?;

            let fetched = logs.len();
            let mut batch = TransferBatch::default();
            for log in logs {
                if !self.is_transfer(&log, contract) {
                    continue;
                }
                match self.decode(&log) {
                    Ok(event) => batch.events.push(event),
                    Err(reason) => {
                        warn!(
                            tx_hash = ?log.transaction_hash,
                            log_index = ?log.log_index,
                            %reason,
                            "Skipping undecodable transfer log"
                        );
                        batch.skipped.push(SkippedLog {
                            tx_hash: log.transaction_hash,
                            log_index: log.log_index,
                            reason,
                        });
                    }
                }
            }

            info!(
                fetched,
                decoded = batch.events.len(),
                skipped = batch.skipped.len(),
                "Fetched transfer events"
            );
            Ok(batch)
        }
        .instrument(span)
        .await
    }

    fn is_transfer(&self, log: &RawLog, contract: Address) -> bool {
        log.address == contract && log.topics.contains(&self.transfer_topic)
    }

    fn decode(&self, log: &RawLog) -> Result<DecodedEvent, String> {
        let (Some(tx_hash), Some(log_index), Some(block_number), Some(block_hash)) = (
            log.transaction_hash,
            log.log_index,
            log.block_number,
            log.block_hash,
        ) else {
            return Err("log has no block metadata (pending)".to_string());
        };

        let decoded = self
            .interface
            .decode_log(TRANSFER_EVENT, &log.topics, &log.data)
            .map_err(|e| e.to_string())?;

        let raw_values = DecodedFields::new(
            decoded
                .into_iter()
                .filter(|(key, _)| !is_synthetic_key(key))
                .collect(),
        );
        let values = normalize_values(&raw_values, self.config.token_decimals);

        Ok(DecodedEvent {
            tx_hash,
            log_index,
            block_number,
            block_hash,
            contract: log.address.to_checksum(None),
            event_name: TRANSFER_EVENT.to_string(),
            topics: log.topics.clone(),
            raw_values,
            values,
        })
    }
}

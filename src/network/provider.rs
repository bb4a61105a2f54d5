// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! [`NetworkClient`] over an alloy provider.

use alloy_json_rpc::RpcError;
use alloy_network::ReceiptResponse;
use alloy_primitives::{Address, TxHash};
use alloy_provider::Provider;
use alloy_rpc_types::{Filter, Log};
use alloy_transport::TransportError;
use async_trait::async_trait;
use tracing::{debug, trace};

use super::{NetworkClient, RawLog, Receipt};
use crate::errors::NetworkError;

/// Adapter from an alloy [`Provider`] to [`NetworkClient`].
///
/// # Examples
///
/// ```rust,ignore
/// use erc20_relay::provider::{create_http_provider, ProviderConfig};
/// use erc20_relay::ProviderNetwork;
///
/// let provider = create_http_provider(ProviderConfig::new("https://eth.llamarpc.com"))?;
/// let network = ProviderNetwork::new(provider);
/// ```
#[derive(Debug, Clone)]
pub struct ProviderNetwork<P> {
    provider: P,
}

impl<P> ProviderNetwork<P> {
    /// Wrap a provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Access the wrapped provider.
    pub fn inner(&self) -> &P {
        &self.provider
    }
}

/// Split node rejections from transport failures.
fn classify(error: TransportError) -> NetworkError {
    match error {
        RpcError::ErrorResp(payload) => {
            NetworkError::rejected(payload.code, payload.message.to_string())
        }
        other => NetworkError::transport(other),
    }
}

fn to_raw_log(log: Log) -> RawLog {
    RawLog {
        address: log.address(),
        topics: log.topics().to_vec(),
        data: log.data().data.clone(),
        block_number: log.block_number,
        block_hash: log.block_hash,
        transaction_hash: log.transaction_hash,
        log_index: log.log_index,
    }
}

#[async_trait]
impl<P> NetworkClient for ProviderNetwork<P>
where
    P: Provider + Send + Sync,
{
    async fn get_logs(
        &self,
        address: Address,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<RawLog>, NetworkError> {
        let filter = Filter::new()
            .address(address)
            .from_block(from_block)
            .to_block(to_block);

        let logs = self.provider.get_logs(&filter).await.map_err(classify)?;
        trace!(count = logs.len(), from_block, to_block, "eth_getLogs returned");
        Ok(logs.into_iter().map(to_raw_log).collect())
    }

    async fn get_transaction_count(&self, address: Address) -> Result<u64, NetworkError> {
        self.provider
            .get_transaction_count(address)
            .await
            .map_err(classify)
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, NetworkError> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(classify)?;
        Ok(*pending.tx_hash())
    }

    async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<Receipt>, NetworkError> {
        let Some(receipt) = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(classify)?
        else {
            return Ok(None);
        };

        match (receipt.block_number(), receipt.block_hash()) {
            (Some(block_number), Some(block_hash)) => Ok(Some(Receipt {
                tx_hash: receipt.transaction_hash(),
                block_number,
                block_hash,
                success: receipt.status(),
                gas_used: receipt.gas_used(),
            })),
            _ => {
                debug!(%tx_hash, "Receipt has no block yet, treating as pending");
                Ok(None)
            }
        }
    }
}

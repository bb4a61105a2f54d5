// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The JSON-RPC network boundary.
//!
//! Core components never talk to a transport directly. They depend on
//! [`NetworkClient`], which exposes exactly the four calls the relay needs.
//! [`ProviderNetwork`] implements it over any alloy [`Provider`](alloy_provider::Provider);
//! tests substitute an in-memory implementation.

mod provider;

use alloy_primitives::{Address, Bytes, TxHash, B256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::NetworkError;

pub use provider::ProviderNetwork;

/// A log entry as returned by `eth_getLogs`.
///
/// Block metadata is optional because nodes omit it for pending logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    /// Emitting contract
    pub address: Address,
    /// `topics[0]` is the event signature for non-anonymous events
    pub topics: Vec<B256>,
    /// ABI-encoded non-indexed parameters
    pub data: Bytes,
    /// Block containing the log
    pub block_number: Option<u64>,
    /// Hash of that block
    pub block_hash: Option<B256>,
    /// Transaction that emitted the log
    pub transaction_hash: Option<TxHash>,
    /// Position of the log within the block
    pub log_index: Option<u64>,
}

/// Outcome of an included transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Block the transaction was included in
    pub block_number: u64,
    /// Hash of that block
    pub block_hash: B256,
    /// `false` if execution reverted
    pub success: bool,
    /// Gas consumed by the transaction
    pub gas_used: u64,
}

/// Minimal asynchronous JSON-RPC surface used by the relay.
///
/// Implementations report a JSON-RPC error response as
/// [`NetworkError::Rejected`] and anything else as
/// [`NetworkError::Transport`]. They must not retry on their own.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// `eth_getLogs` filtered by emitting address over an inclusive block range.
    async fn get_logs(
        &self,
        address: Address,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<RawLog>, NetworkError>;

    /// `eth_getTransactionCount` for the latest block.
    async fn get_transaction_count(&self, address: Address) -> Result<u64, NetworkError>;

    /// `eth_sendRawTransaction`; returns the hash reported by the node.
    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, NetworkError>;

    /// `eth_getTransactionReceipt`; `None` while the transaction is pending.
    async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<Receipt>, NetworkError>;
}

#[async_trait]
impl<T: NetworkClient + ?Sized> NetworkClient for std::sync::Arc<T> {
    async fn get_logs(
        &self,
        address: Address,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<RawLog>, NetworkError> {
        (**self).get_logs(address, from_block, to_block).await
    }

    async fn get_transaction_count(&self, address: Address) -> Result<u64, NetworkError> {
        (**self).get_transaction_count(address).await
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, NetworkError> {
        (**self).send_raw_transaction(raw).await
    }

    async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<Receipt>, NetworkError> {
        (**self).get_transaction_receipt(tx_hash).await
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Decoded transfer events and the fetcher that produces them.

mod fetcher;

use alloy_primitives::{BlockNumber, TxHash, B256};
use serde::Serialize;

use crate::abi::DecodedFields;
use crate::normalize::NormalizedFields;

pub use fetcher::LogFetcher;

/// One decoded token event.
///
/// Serializes with camelCase keys; `rawValues` holds base-unit integers as
/// decimal strings and `values` the same amounts scaled by the token decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedEvent {
    /// Emitting transaction
    pub tx_hash: TxHash,
    /// Position of the log within its block
    pub log_index: u64,
    /// Block containing the log
    pub block_number: BlockNumber,
    /// Hash of that block
    pub block_hash: B256,
    /// Checksummed contract address
    pub contract: String,
    /// Declared event name
    pub event_name: String,
    /// Log topics as returned by the node
    pub topics: Vec<B256>,
    /// Decoded field values
    pub raw_values: DecodedFields,
    /// Display-normalized field values
    pub values: NormalizedFields,
}

/// A matching log that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedLog {
    /// Emitting transaction, if the node reported it
    pub tx_hash: Option<TxHash>,
    /// Log index, if the node reported it
    pub log_index: Option<u64>,
    /// Why decoding failed
    pub reason: String,
}

/// Result of a fetch, including what was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransferBatch {
    /// Decoded events in node order
    pub events: Vec<DecodedEvent>,
    /// Logs dropped during decoding
    pub skipped: Vec<SkippedLog>,
}

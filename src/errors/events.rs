// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for transfer log fetching.
//!
//! Per-log decode failures are deliberately absent: they are collected in
//! [`TransferBatch::skipped`](crate::events::TransferBatch) instead of failing
//! the whole fetch.

use super::{RegistryError, RpcError};

/// Errors that can occur while fetching transfer events.
///
/// # Examples
///
/// ```rust,ignore
/// use erc20_relay::{FetchError, LogFetcher};
///
/// match fetcher.fetch(1, 8_965_690, 8_965_695).await {
///     Ok(events) => println!("{} transfers", events.len()),
///     Err(FetchError::RangeTooLarge { requested, max }) => {
///         eprintln!("split the query: {requested} blocks > {max}");
///     }
///     Err(e) => eprintln!("fetch failed: {e}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The inclusive block span exceeds the configured maximum.
    #[error("Block range too large: {requested} blocks requested, at most {max} allowed")]
    RangeTooLarge {
        /// Number of blocks in the requested range
        requested: u64,
        /// Configured maximum
        max: u64,
    },

    /// `from_block` is after `to_block`.
    #[error("Invalid block range: {from_block} > {to_block}")]
    InvalidRange {
        /// Requested lower bound
        from_block: u64,
        /// Requested upper bound
        to_block: u64,
    },

    /// The chain is not in the registry.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The log query itself failed.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

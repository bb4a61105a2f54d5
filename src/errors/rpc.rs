// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared RPC error types for network boundary operations.
//!
//! Two layers live here. [`NetworkError`] is what a
//! [`NetworkClient`](crate::network::NetworkClient) implementation returns: it
//! only distinguishes "the node answered with an error" from "the request never
//! got a usable answer". [`RpcError`] is what the higher-level components wrap
//! those failures into, adding the operation that was being performed.

use alloy_primitives::{Address, TxHash};

/// Failure reported by a network boundary implementation.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The node processed the request and answered with a JSON-RPC error.
    ///
    /// For `eth_sendRawTransaction` this covers invalid nonces, insufficient
    /// funds and malformed encodings.
    #[error("node rejected request (code {code}): {message}")]
    Rejected {
        /// JSON-RPC error code
        code: i64,
        /// Error message returned by the node
        message: String,
    },

    /// The request did not produce a usable response (connection, timeout,
    /// malformed payload).
    #[error("transport failure: {source}")]
    Transport {
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl NetworkError {
    /// Create a `Rejected` error.
    pub fn rejected(code: i64, message: impl Into<String>) -> Self {
        NetworkError::Rejected {
            code,
            message: message.into(),
        }
    }

    /// Create a `Transport` error from any error type.
    pub fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        NetworkError::Transport {
            source: Box::new(source),
        }
    }

    /// Create a `Transport` error from a plain message.
    pub fn transport_msg(message: impl Into<String>) -> Self {
        NetworkError::Transport {
            source: message.into().into(),
        }
    }
}

/// Errors that can occur during blockchain RPC operations.
///
/// Each variant records which operation failed so logs and error chains stay
/// readable when the same transport is used by several components.
///
/// # Examples
///
/// ```rust
/// use erc20_relay::{NetworkError, RpcError};
///
/// let error = RpcError::get_logs_failed(
///     "Transfer logs 100-200",
///     NetworkError::transport_msg("connection reset"),
/// );
/// assert_eq!(error.to_string(), "Failed to fetch logs for Transfer logs 100-200");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Failed to fetch logs from the blockchain.
    #[error("Failed to fetch logs for {operation}")]
    GetLogsFailed {
        /// Description of the operation that failed (e.g., "Transfer logs 100-200")
        operation: String,
        /// The underlying network error
        #[source]
        source: NetworkError,
    },

    /// Failed to read the transaction count (nonce) of an account.
    #[error("Failed to get transaction count for {address}")]
    GetTransactionCountFailed {
        /// The account whose nonce was requested
        address: Address,
        /// The underlying network error
        #[source]
        source: NetworkError,
    },

    /// Submitting a raw transaction failed before the node could judge it.
    #[error("Failed to submit raw transaction {tx_hash}")]
    SendRawTransactionFailed {
        /// Locally computed hash of the transaction
        tx_hash: TxHash,
        /// The underlying network error
        #[source]
        source: NetworkError,
    },

    /// Failed to query a transaction receipt.
    ///
    /// This is different from "no receipt yet": the RPC call itself failed.
    #[error("Failed to fetch receipt for transaction {tx_hash}")]
    GetReceiptFailed {
        /// The transaction hash whose receipt was requested
        tx_hash: TxHash,
        /// The underlying network error
        #[source]
        source: NetworkError,
    },

    /// Provider URL could not be parsed.
    #[error("Invalid provider URL: {0}")]
    ProviderUrlInvalid(String),
}

impl RpcError {
    /// Helper to create a `GetLogsFailed` error.
    pub fn get_logs_failed(operation: impl Into<String>, source: NetworkError) -> Self {
        RpcError::GetLogsFailed {
            operation: operation.into(),
            source,
        }
    }

    /// Helper to create a `GetTransactionCountFailed` error.
    pub fn get_transaction_count_failed(address: Address, source: NetworkError) -> Self {
        RpcError::GetTransactionCountFailed { address, source }
    }

    /// Helper to create a `SendRawTransactionFailed` error.
    pub fn send_raw_transaction_failed(tx_hash: TxHash, source: NetworkError) -> Self {
        RpcError::SendRawTransactionFailed { tx_hash, source }
    }

    /// Helper to create a `GetReceiptFailed` error.
    pub fn get_receipt_failed(tx_hash: TxHash, source: NetworkError) -> Self {
        RpcError::GetReceiptFailed { tx_hash, source }
    }
}

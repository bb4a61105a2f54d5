// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for building, assembling and broadcasting transactions.

use alloy_primitives::TxHash;

use super::{AbiError, RegistryError, RpcError, SignerError};

/// Errors that can occur while building an unsigned transfer transaction.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The amount is not a non-negative integer that fits in 256 bits.
    #[error("Invalid amount `{input}`: {reason}")]
    InvalidAmount {
        /// Amount as supplied
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// The gas price cannot be expressed as a whole number of wei.
    #[error("Invalid gas price `{input}` gwei: {reason}")]
    InvalidGasPrice {
        /// Gas price as supplied, in gwei
        input: String,
        /// Why it was rejected
        reason: String,
    },

    /// The chain is not in the registry.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Call-data encoding failed.
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),
}

impl BuildError {
    /// Create an `InvalidAmount` error.
    pub fn invalid_amount(input: impl Into<String>, reason: impl Into<String>) -> Self {
        BuildError::InvalidAmount {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create an `InvalidGasPrice` error.
    pub fn invalid_gas_price(input: impl Into<String>, reason: impl Into<String>) -> Self {
        BuildError::InvalidGasPrice {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while merging a device signature into a transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssembleError {
    /// The signature components are not usable.
    #[error("Invalid signature: {details}")]
    InvalidSignature {
        /// What was wrong
        details: String,
    },

    /// The signature's EIP-155 `v` encodes a different chain.
    #[error("Signature is for chain {signed_for}, transaction is for chain {expected}")]
    ChainMismatch {
        /// Chain id of the unsigned transaction
        expected: u64,
        /// Chain id recovered from `v`
        signed_for: u64,
    },
}

impl AssembleError {
    /// Create an `InvalidSignature` error.
    pub fn invalid_signature(details: impl Into<String>) -> Self {
        AssembleError::InvalidSignature {
            details: details.into(),
        }
    }
}

/// Errors that can occur while submitting a transaction or waiting for it.
///
/// `BroadcastRejected` is terminal: resubmitting the same bytes fails the same
/// way. `ConfirmationTimeout` only means the poll budget ran out; the
/// transaction may still be pending and can be polled again with the same
/// handle.
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    /// The node refused the transaction.
    #[error("Broadcast of {tx_hash} rejected: {reason}")]
    BroadcastRejected {
        /// Locally computed transaction hash
        tx_hash: TxHash,
        /// Node-provided reason
        reason: String,
    },

    /// No receipt was seen within the attempt budget.
    #[error("Transaction {tx_hash} not confirmed after {attempts} attempts")]
    ConfirmationTimeout {
        /// Transaction being tracked
        tx_hash: TxHash,
        /// Number of receipt queries made
        attempts: u32,
    },

    /// Transport failure while talking to the node.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

/// Errors from a full transfer session, tagged with the stage that failed.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// Deriving the sender address or signing failed on the device.
    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),

    /// Reading the sender's nonce failed.
    #[error("Nonce lookup failed: {0}")]
    Nonce(#[source] RpcError),

    /// Building the unsigned transaction failed.
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// The device signature could not be merged.
    #[error("Assemble error: {0}")]
    Assemble(#[from] AssembleError),

    /// Submission or confirmation failed.
    #[error("Broadcast error: {0}")]
    Broadcast(#[from] BroadcastError),
}

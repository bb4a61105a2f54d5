// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the erc20-relay library.
//!
//! This module provides strongly-typed errors for all public APIs. It follows
//! a hybrid approach:
//!
//! - **Module-specific errors** for fine-grained handling ([`AbiError`],
//!   [`BuildError`], [`SignerError`], ...)
//! - **Unified error type** ([`RelayError`]) for callers that only need to
//!   report a failure
//!
//! # Architecture
//!
//! - [`AbiError`] - declaration, encoding and decoding against the contract interface
//! - [`RegistryError`] - network table loading and chain resolution
//! - [`FetchError`] - transfer log retrieval
//! - [`BuildError`] - unsigned transaction construction
//! - [`SignerError`] - the external signing device
//! - [`AssembleError`] - merging the signature into the transaction
//! - [`BroadcastError`] - submission and confirmation tracking
//! - [`TransferError`] - the end-to-end send path
//!
//! [`RpcError`] and [`NetworkError`] are shared by every component that talks
//! to the network boundary.
//!
//! # Examples
//!
//! ```rust,ignore
//! use erc20_relay::{BroadcastError, TransferError};
//!
//! match session.send(request).await {
//!     Ok(receipt) => println!("included in block {}", receipt.block_number),
//!     Err(TransferError::Broadcast(BroadcastError::ConfirmationTimeout { tx_hash, .. })) => {
//!         // Still possibly pending: poll again with the same hash, do not resend.
//!         eprintln!("{tx_hash} not confirmed yet");
//!     }
//!     Err(e) => eprintln!("transfer failed: {e}"),
//! }
//! ```

mod abi;
mod events;
mod registry;
mod rpc;
mod signer;
mod transaction;

pub use abi::AbiError;
pub use events::FetchError;
pub use registry::RegistryError;
pub use rpc::{NetworkError, RpcError};
pub use signer::SignerError;
pub use transaction::{AssembleError, BroadcastError, BuildError, TransferError};

/// Unified error type for all erc20-relay operations.
///
/// All module-specific error types convert into `RelayError` via `From`, so
/// `?` works across components.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Error from the ABI codec.
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),

    /// Error from the network registry.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Error from log fetching.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error from transaction building.
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Error from the signing device.
    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),

    /// Error from signature assembly.
    #[error("Assemble error: {0}")]
    Assemble(#[from] AssembleError),

    /// Error from broadcasting or confirmation.
    #[error("Broadcast error: {0}")]
    Broadcast(#[from] BroadcastError),

    /// Error from a full transfer session.
    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    /// Error from provider construction or a raw RPC call.
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),
}

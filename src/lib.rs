// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # erc20-relay
//!
//! Read ERC-20 `Transfer` events and send hardware-signed token transfers on
//! EVM chains.
//!
//! ## Read path
//!
//! [`LogFetcher`] resolves the token contract for a chain in the
//! [`NetworkRegistry`], queries `eth_getLogs` over a bounded block range,
//! decodes every `Transfer` log with the [`ContractInterface`] codec and
//! scales amounts by the token decimals:
//!
//! ```rust,ignore
//! use erc20_relay::provider::{create_http_network, ProviderConfig};
//! use erc20_relay::{LogFetcher, NetworkRegistry, RelayConfig};
//!
//! let network = create_http_network(ProviderConfig::infura(&project_id, "mainnet"))?;
//! let fetcher = LogFetcher::new(network, NetworkRegistry::usdt(), RelayConfig::default())?;
//!
//! for event in fetcher.fetch(1, 8_965_690, 8_965_695).await? {
//!     println!("{}", serde_json::to_string(&event)?);
//! }
//! ```
//!
//! ## Write path
//!
//! [`TransferSession`] derives the sender from an [`ExternalSigner`], reads
//! its nonce, builds an EIP-155 legacy transaction, has the device sign it,
//! assembles the raw bytes, broadcasts once and polls for the receipt. The
//! private key never leaves the device.
//!
//! ```rust,ignore
//! use erc20_relay::{DeviceSigner, TransferRequest, TransferSession};
//!
//! let session = TransferSession::new(network, DeviceSigner::new(transport), registry, config)?;
//! let receipt = session
//!     .send(&TransferRequest {
//!         to: recipient,
//!         amount: "10".into(),
//!         chain_id: 1,
//!         gas_price_gwei: "10".into(),
//!         derivation_path: "44'/60'/0'/0/0".parse()?,
//!     })
//!     .await?;
//! ```
//!
//! Each stage is also usable on its own: [`TransactionBuilder`],
//! [`sign_cancellable`], [`assemble`] and [`Broadcaster`].
//!
//! ## Network boundary
//!
//! Everything that talks to a node goes through [`NetworkClient`].
//! [`ProviderNetwork`] adapts any alloy provider; the [`provider`] module
//! builds an HTTP one.

pub mod abi;
pub mod config;
pub mod errors;
pub mod events;
pub mod network;
pub mod normalize;
pub mod provider;
pub mod registry;
pub mod signer;
mod spans;
pub mod tx;
pub mod types;

pub use abi::{AbiValue, ContractInterface, DecodedFields, ERC20_DECLARATIONS};
pub use config::{ChainConfig, RelayConfig, RelayConfigBuilder};
pub use errors::{
    AbiError, AssembleError, BroadcastError, BuildError, FetchError, NetworkError, RegistryError,
    RelayError, RpcError, SignerError, TransferError,
};
pub use events::{DecodedEvent, LogFetcher, SkippedLog, TransferBatch};
pub use network::{NetworkClient, ProviderNetwork, RawLog, Receipt};
pub use normalize::{normalize_values, NormalizedFields, NormalizedValue};
pub use registry::{NetworkEntry, NetworkRegistry, USDT_NETWORKS};
pub use signer::{
    sign_cancellable, DerivationPath, DeviceRequest, DeviceResponse, DeviceSignature,
    DeviceSigner, DeviceTransport, ExternalSigner, TransportFailure,
};
pub use tx::{
    assemble, Broadcaster, SignedTransaction, TransactionBuilder, TransferRequest,
    TransferSession, TxHandle, UnsignedTransaction,
};
pub use types::config::{GasLimit, MaxBlockRange};
pub use types::tokens::{TokenAmount, TokenDecimals};
pub use types::wei::WeiAmount;

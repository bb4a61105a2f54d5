// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP provider construction
//!
//! The relay itself only depends on [`NetworkClient`](crate::NetworkClient).
//! This module builds the concrete alloy provider most callers plug into it:
//!
//! - [`create_http_provider`] - an Ethereum HTTP `RootProvider`
//! - [`create_http_network`] - the same, wrapped in [`ProviderNetwork`](crate::ProviderNetwork)
//!
//! # Examples
//!
//! ```rust,ignore
//! use erc20_relay::provider::{create_http_network, ProviderConfig};
//! use erc20_relay::{LogFetcher, NetworkRegistry, RelayConfig};
//!
//! let network = create_http_network(ProviderConfig::infura(&project_id, "mainnet"))?;
//! let fetcher = LogFetcher::new(network, NetworkRegistry::usdt(), RelayConfig::default())?;
//! let events = fetcher.fetch(1, 8_965_690, 8_965_695).await?;
//! ```

mod config;
mod factory;

use alloy_network::Ethereum;

pub use config::ProviderConfig;
pub use factory::{create_http_network, create_http_provider};

/// HTTP provider for Ethereum-family chains
pub type EthereumHttpProvider = alloy_provider::RootProvider<Ethereum>;

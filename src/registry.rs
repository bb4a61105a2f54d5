// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Network registry: which contract address to use on which chain.
//!
//! A [`NetworkRegistry`] is an immutable value built once at start-up and
//! handed to the components that need it. It is never mutated after
//! construction.

use std::collections::BTreeMap;
use std::path::Path;

use alloy_chains::Chain;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::constants::usdt;
use crate::errors::RegistryError;

/// Deployment of the token contract on one chain.
///
/// Serializes as `{"chainId":1,"address":"0x…","originBlock":4634748}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkEntry {
    /// EIP-155 chain id
    pub chain_id: u64,
    /// Token contract address
    #[serde(rename = "address")]
    pub contract_address: Address,
    /// Block in which the contract was deployed; no earlier block has logs
    pub origin_block: u64,
}

impl NetworkEntry {
    /// Create a new entry.
    pub const fn new(chain_id: u64, contract_address: Address, origin_block: u64) -> Self {
        Self {
            chain_id,
            contract_address,
            origin_block,
        }
    }

    /// The chain, for display (`mainnet`, `goerli`, or the bare id).
    pub fn chain(&self) -> Chain {
        Chain::from_id(self.chain_id)
    }

    /// EIP-55 checksummed contract address.
    pub fn checksummed_address(&self) -> String {
        self.contract_address.to_checksum(None)
    }
}

/// Declared USDT deployments.
pub const USDT_NETWORKS: &[NetworkEntry] = &[
    NetworkEntry::new(1, usdt::MAINNET, usdt::MAINNET_ORIGIN_BLOCK),
    NetworkEntry::new(3, usdt::ROPSTEN, usdt::ROPSTEN_ORIGIN_BLOCK),
    NetworkEntry::new(5, usdt::GOERLI, usdt::GOERLI_ORIGIN_BLOCK),
];

/// Immutable mapping from chain id to [`NetworkEntry`].
///
/// # Examples
///
/// ```
/// use erc20_relay::{NetworkRegistry, RegistryError};
///
/// let registry = NetworkRegistry::usdt();
/// let mainnet = registry.resolve(1).unwrap();
/// assert_eq!(
///     mainnet.checksummed_address(),
///     "0xdAC17F958D2ee523a2206206994597C13D831ec7"
/// );
///
/// assert!(matches!(
///     registry.resolve(999),
///     Err(RegistryError::UnsupportedNetwork { chain_id: 999 })
/// ));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkRegistry {
    entries: BTreeMap<u64, NetworkEntry>,
}

impl NetworkRegistry {
    /// Build a registry from entries.
    ///
    /// Construction is all-or-nothing: if any chain id repeats, no registry
    /// is produced.
    pub fn new(entries: impl IntoIterator<Item = NetworkEntry>) -> Result<Self, RegistryError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            if map.insert(entry.chain_id, entry).is_some() {
                return Err(RegistryError::DuplicateChain {
                    chain_id: entry.chain_id,
                });
            }
        }
        Ok(Self { entries: map })
    }

    /// The declared USDT deployments (mainnet, ropsten, goerli).
    pub fn usdt() -> Self {
        Self {
            entries: USDT_NETWORKS.iter().map(|e| (e.chain_id, *e)).collect(),
        }
    }

    /// Parse a JSON array of entries.
    ///
    /// ```
    /// use erc20_relay::NetworkRegistry;
    ///
    /// let registry = NetworkRegistry::from_json(
    ///     r#"[{"chainId":4,"address":"0x0000000000000000000000000000000000000004","originBlock":0}]"#,
    /// )
    /// .unwrap();
    /// assert_eq!(registry.chain_ids().collect::<Vec<_>>(), vec![4]);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let entries: Vec<NetworkEntry> =
            serde_json::from_str(json).map_err(|e| RegistryError::invalid_table(e.to_string()))?;
        Self::new(entries)
    }

    /// Read and parse a JSON network table from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| RegistryError::Io {
                path: path.display().to_string(),
                source,
            })?;
        let registry = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            networks = registry.len(),
            "Loaded network table"
        );
        Ok(registry)
    }

    /// Look up the entry for `chain_id`.
    pub fn resolve(&self, chain_id: u64) -> Result<&NetworkEntry, RegistryError> {
        self.entries
            .get(&chain_id)
            .ok_or_else(|| RegistryError::unsupported_network(chain_id))
    }

    /// Registered chain ids in ascending order.
    pub fn chain_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.entries.keys().copied()
    }

    /// All entries in ascending chain id order.
    pub fn entries(&self) -> impl Iterator<Item = &NetworkEntry> {
        self.entries.values()
    }

    /// Number of registered chains.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no chain is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the table back to its JSON form.
    pub fn to_json(&self) -> Result<String, RegistryError> {
        let entries: Vec<&NetworkEntry> = self.entries.values().collect();
        serde_json::to_string_pretty(&entries).map_err(|e| RegistryError::invalid_table(e.to_string()))
    }
}

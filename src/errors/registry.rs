// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the network registry.

/// Errors that can occur while building or querying a
/// [`NetworkRegistry`](crate::NetworkRegistry).
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No entry is declared for the chain id.
    #[error("Unsupported network: chain id {chain_id}")]
    UnsupportedNetwork {
        /// The chain id that was requested
        chain_id: u64,
    },

    /// The table declares the same chain id twice.
    #[error("Duplicate network entry for chain id {chain_id}")]
    DuplicateChain {
        /// The repeated chain id
        chain_id: u64,
    },

    /// The network table could not be parsed.
    #[error("Invalid network table: {details}")]
    InvalidTable {
        /// Parse failure details
        details: String,
    },

    /// The network table file could not be read.
    #[error("Failed to read network table {path}")]
    Io {
        /// Path that was read
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl RegistryError {
    /// Create an `UnsupportedNetwork` error.
    pub fn unsupported_network(chain_id: u64) -> Self {
        RegistryError::UnsupportedNetwork { chain_id }
    }

    /// Create an `InvalidTable` error.
    pub fn invalid_table(details: impl Into<String>) -> Self {
        RegistryError::InvalidTable {
            details: details.into(),
        }
    }
}

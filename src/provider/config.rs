// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider configuration options

/// Configuration for creating providers
///
/// # Example
///
/// ```rust
/// use erc20_relay::provider::ProviderConfig;
///
/// let config = ProviderConfig::infura("my-project-id", "mainnet");
/// assert_eq!(config.url, "https://mainnet.infura.io/v3/my-project-id");
/// ```
///
/// Note: RPC request/response logging is handled natively by alloy's transport
/// layer at DEBUG/TRACE level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// RPC endpoint URL
    pub url: String,
}

impl ProviderConfig {
    /// Create a new provider configuration with the specified URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Configuration preset for a local node
    #[must_use]
    pub fn local_node() -> Self {
        Self::new("http://localhost:8545")
    }

    /// Configuration preset for Infura
    #[must_use]
    pub fn infura(project_id: &str, network: &str) -> Self {
        Self::new(format!("https://{network}.infura.io/v3/{project_id}"))
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::local_node()
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider factory functions

use alloy_provider::ProviderBuilder;

use crate::errors::RpcError;
use crate::network::ProviderNetwork;

use super::config::ProviderConfig;
use super::EthereumHttpProvider;

/// Create an HTTP provider with the given configuration
///
/// Recommended fillers are disabled: the relay fills nonce, gas and chain id
/// itself and signs outside the provider, so a bare `RootProvider` is all it
/// needs.
///
/// # Examples
///
/// ```rust,ignore
/// use erc20_relay::provider::{create_http_provider, ProviderConfig};
///
/// let provider = create_http_provider(ProviderConfig::new("https://eth.llamarpc.com"))?;
/// ```
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_provider(config: ProviderConfig) -> Result<EthereumHttpProvider, RpcError> {
    let url: url::Url = config
        .url
        .parse()
        .map_err(|e| RpcError::ProviderUrlInvalid(format!("{e}")))?;

    Ok(ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_http(url))
}

/// Create a [`ProviderNetwork`] backed by an HTTP provider
///
/// # Errors
///
/// Returns [`RpcError::ProviderUrlInvalid`] if the URL cannot be parsed.
pub fn create_http_network(
    config: ProviderConfig,
) -> Result<ProviderNetwork<EthereumHttpProvider>, RpcError> {
    create_http_provider(config).map(ProviderNetwork::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_http_provider_valid_url() {
        let result = create_http_provider(ProviderConfig::new("https://eth.llamarpc.com"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_create_http_provider_invalid_url() {
        let result = create_http_provider(ProviderConfig::new("not a valid url"));
        assert!(matches!(result, Err(RpcError::ProviderUrlInvalid(_))));
    }

    #[test]
    fn test_create_http_network_invalid_url() {
        let result = create_http_network(ProviderConfig::new(""));
        assert!(matches!(result, Err(RpcError::ProviderUrlInvalid(_))));
    }
}

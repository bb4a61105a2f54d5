//! Configuration for erc20-relay operations
//!
//! This module controls log query limits, token scaling, the transfer gas
//! limit and confirmation polling.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use erc20_relay::RelayConfig;
//!
//! // USDT (6 decimals), 5000-block log queries, 90 000 gas transfers
//! let config = RelayConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use erc20_relay::RelayConfigBuilder;
//! use std::time::Duration;
//!
//! let config = RelayConfigBuilder::with_defaults()
//!     .max_block_range(1000)
//!     .chain_max_blocks(5, 200)
//!     .poll_interval(Duration::from_secs(2))
//!     .build();
//! ```

use std::collections::HashMap;
use std::time::Duration;

use alloy_chains::Chain;

use crate::types::config::{GasLimit, MaxBlockRange};
use crate::types::tokens::TokenDecimals;

pub mod constants;

use constants::{polling, transaction, usdt};

/// Configuration for relay operations
///
/// Use [`RelayConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    /// Maximum inclusive block span of a single log query
    /// Default: 5000
    pub max_block_range: MaxBlockRange,

    /// Decimals used to scale token amounts
    /// Default: 6 (USDT)
    pub token_decimals: TokenDecimals,

    /// Gas limit attached to every transfer
    /// Default: 90 000
    pub transfer_gas_limit: GasLimit,

    /// Delay between receipt queries while awaiting confirmation
    /// Default: 5 seconds
    pub poll_interval: Duration,

    /// Receipt queries before giving up on confirmation
    /// Default: 60
    pub max_poll_attempts: u32,

    /// Chain-specific overrides
    pub chain_overrides: HashMap<Chain, ChainConfig>,
}

/// Chain-specific configuration overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainConfig {
    /// Override max block range for this chain
    pub max_block_range: Option<MaxBlockRange>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::with_common_defaults()
    }
}

impl RelayConfig {
    /// Create config with the USDT defaults
    pub fn with_common_defaults() -> Self {
        Self {
            max_block_range: MaxBlockRange::DEFAULT,
            token_decimals: TokenDecimals::new(usdt::DECIMALS),
            transfer_gas_limit: GasLimit::new(transaction::TRANSFER_GAS_LIMIT),
            poll_interval: polling::POLL_INTERVAL,
            max_poll_attempts: polling::MAX_POLL_ATTEMPTS,
            chain_overrides: HashMap::new(),
        }
    }

    /// Create minimal config for tests and local nodes
    ///
    /// Same as the defaults but polls without delay.
    ///
    /// ```rust
    /// use erc20_relay::RelayConfig;
    /// use std::time::Duration;
    ///
    /// let config = RelayConfig::minimal();
    /// assert_eq!(config.poll_interval, Duration::ZERO);
    /// ```
    pub fn minimal() -> Self {
        Self {
            poll_interval: Duration::ZERO,
            ..Self::with_common_defaults()
        }
    }

    /// Get effective max block range for a specific chain
    ///
    /// Returns chain-specific override if set, otherwise returns global default.
    ///
    /// # Example
    ///
    /// ```rust
    /// use erc20_relay::{ChainConfig, MaxBlockRange, RelayConfig};
    ///
    /// let mut config = RelayConfig::minimal();
    /// config.set_chain_override(
    ///     3,
    ///     ChainConfig {
    ///         max_block_range: Some(MaxBlockRange::new(1000)),
    ///     },
    /// );
    ///
    /// assert_eq!(config.get_max_block_range(3), MaxBlockRange::new(1000));
    /// assert_eq!(config.get_max_block_range(1), MaxBlockRange::DEFAULT);
    /// ```
    pub fn get_max_block_range(&self, chain: impl Into<Chain>) -> MaxBlockRange {
        self.chain_overrides
            .get(&chain.into())
            .and_then(|c| c.max_block_range)
            .unwrap_or(self.max_block_range)
    }

    /// Set chain-specific override
    pub fn set_chain_override(&mut self, chain: impl Into<Chain>, config: ChainConfig) {
        self.chain_overrides.insert(chain.into(), config);
    }
}

/// Builder for [`RelayConfig`]
///
/// # Example
///
/// ```rust
/// use erc20_relay::RelayConfigBuilder;
///
/// let config = RelayConfigBuilder::new()
///     .token_decimals(18)
///     .transfer_gas_limit(120_000)
///     .max_poll_attempts(10)
///     .build();
/// assert_eq!(config.token_decimals.as_u8(), 18);
/// ```
pub struct RelayConfigBuilder {
    config: RelayConfig,
}

impl Default for RelayConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: RelayConfig::minimal(),
        }
    }

    /// Start with common defaults
    pub fn with_defaults() -> Self {
        Self {
            config: RelayConfig::with_common_defaults(),
        }
    }

    /// Set global max block range
    pub fn max_block_range(mut self, max: u64) -> Self {
        self.config.max_block_range = MaxBlockRange::new(max);
        self
    }

    /// Set the decimals used to scale token amounts
    pub fn token_decimals(mut self, decimals: u8) -> Self {
        self.config.token_decimals = TokenDecimals::new(decimals);
        self
    }

    /// Set the transfer gas limit
    pub fn transfer_gas_limit(mut self, gas: u64) -> Self {
        self.config.transfer_gas_limit = GasLimit::new(gas);
        self
    }

    /// Set the delay between receipt queries
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    /// Set the number of receipt queries before giving up
    pub fn max_poll_attempts(mut self, attempts: u32) -> Self {
        self.config.max_poll_attempts = attempts;
        self
    }

    /// Add chain-specific configuration
    pub fn chain_config(mut self, chain: impl Into<Chain>, config: ChainConfig) -> Self {
        self.config.set_chain_override(chain, config);
        self
    }

    /// Convenience: set max block range for a specific chain
    pub fn chain_max_blocks(mut self, chain: impl Into<Chain>, max: u64) -> Self {
        let chain = chain.into();
        let mut chain_config = self
            .config
            .chain_overrides
            .remove(&chain)
            .unwrap_or_default();
        chain_config.max_block_range = Some(MaxBlockRange::new(max));
        self.config.set_chain_override(chain, chain_config);
        self
    }

    /// Build the final configuration
    pub fn build(self) -> RelayConfig {
        self.config
    }
}

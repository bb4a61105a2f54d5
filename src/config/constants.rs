//! Well-known addresses and constants
//!
//! This module centralizes magic constants and well-known blockchain addresses
//! used throughout the erc20-relay crate.

use alloy_primitives::{address, Address};

/// USDT deployments
pub mod usdt {
    use super::*;

    /// USDT on Ethereum Mainnet
    ///
    /// Contract: 0xdAC17F958D2ee523a2206206994597C13D831ec7
    pub const MAINNET: Address = address!("dac17f958d2ee523a2206206994597c13d831ec7");

    /// Deployment block on Ethereum Mainnet
    pub const MAINNET_ORIGIN_BLOCK: u64 = 4_634_748;

    /// USDT on Ropsten
    pub const ROPSTEN: Address = address!("7a434fbdaca6d9bee580fe2c285c9859bc63fb67");

    /// Deployment block on Ropsten
    pub const ROPSTEN_ORIGIN_BLOCK: u64 = 6_414_181;

    /// USDT on Goerli
    pub const GOERLI: Address = address!("acced4e43d89177de0b77fd4c0f53ac215f02627");

    /// Deployment block on Goerli
    pub const GOERLI_ORIGIN_BLOCK: u64 = 1_318_894;

    /// USDT has 6 decimals on every deployment
    pub const DECIMALS: u8 = 6;
}

/// Transaction defaults
pub mod transaction {
    /// Fixed gas limit for an ERC-20 `transfer` (0x15f90)
    pub const TRANSFER_GAS_LIMIT: u64 = 90_000;

    /// BIP-44 path of the first Ethereum account
    pub const DEFAULT_DERIVATION_PATH: &str = "44'/60'/0'/0/0";
}

/// Confirmation polling defaults
pub mod polling {
    use std::time::Duration;

    /// Delay between receipt queries
    pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

    /// Receipt queries before giving up (five minutes at the default interval)
    pub const MAX_POLL_ATTEMPTS: u32 = 60;
}

//! Token decimal precision type

use serde::{Deserialize, Serialize};

/// ERC-20 token decimal precision
///
/// Represents the number of decimal places for a token, i.e. the scale
/// divisor `10^decimals` between raw on-chain integers and display values:
/// - USDT/USDC: 6 decimals
/// - WBTC: 8 decimals
/// - Standard: 18 decimals
///
/// # Examples
///
/// ```
/// use erc20_relay::TokenDecimals;
///
/// let usdt = TokenDecimals::USDT;
/// assert_eq!(usdt.as_u8(), 6);
/// assert_eq!(usdt.divisor_string(), "1000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenDecimals(u8);

impl TokenDecimals {
    /// Maximum reasonable decimals (following ERC-20 convention)
    pub const MAX_REASONABLE: u8 = 18;

    /// Standard decimals for ETH-like tokens (18)
    pub const STANDARD: Self = Self(18);

    /// USDT decimals (6)
    pub const USDT: Self = Self(6);

    /// USDC decimals (6)
    pub const USDC: Self = Self(6);

    /// WBTC decimals (8)
    pub const WBTC: Self = Self(8);

    /// Gwei relative to wei (9)
    pub const GWEI: Self = Self(9);

    /// Create a new decimal precision value
    pub const fn new(decimals: u8) -> Self {
        Self(decimals)
    }

    /// Get the inner u8 value
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// Check if decimals are in reasonable range (0-18)
    ///
    /// The ERC-20 standard allows any u8 value, but values over 18 are
    /// unusual and usually point at a configuration mistake.
    pub const fn is_reasonable(&self) -> bool {
        self.0 <= Self::MAX_REASONABLE
    }

    /// The scale divisor `10^decimals` as a decimal string.
    pub fn divisor_string(&self) -> String {
        format!("1{}", "0".repeat(usize::from(self.0)))
    }
}

impl Default for TokenDecimals {
    fn default() -> Self {
        Self::USDT
    }
}

impl From<u8> for TokenDecimals {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenDecimals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} decimals", self.0)
    }
}

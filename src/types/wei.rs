// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for native currency amounts
//!
//! Gas prices are supplied by the operator in gwei and carried in wei. The
//! newtype keeps them from being mixed up with ERC-20 token amounts.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::errors::BuildError;
use crate::types::units::{format_units, parse_units};

const GWEI_DECIMALS: u8 = 9;

/// Represents an amount of native currency (ETH) in wei
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use erc20_relay::WeiAmount;
///
/// let gas_price = WeiAmount::from_gwei_str("10").unwrap();
/// assert_eq!(gas_price.as_u256(), U256::from(10_000_000_000u64));
/// assert_eq!(gas_price.to_string(), "10 gwei");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct WeiAmount(U256);

impl WeiAmount {
    /// Zero wei amount
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new wei amount
    pub const fn new(wei: U256) -> Self {
        Self(wei)
    }

    /// Get the inner U256 value (in wei)
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Convert to u128 if it fits, otherwise None
    ///
    /// Legacy transactions carry the gas price as a 128-bit integer.
    pub fn as_u128(&self) -> Option<u128> {
        self.0.try_into().ok()
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Parse a gas price given in gwei (`"10"`, `"1.5"`) into wei exactly.
    ///
    /// # Errors
    ///
    /// [`BuildError::InvalidGasPrice`] for negative or malformed input, for a
    /// value with a fractional wei part, and for a value that does not fit
    /// the 128-bit gas price field of a legacy transaction.
    pub fn from_gwei_str(input: &str) -> Result<Self, BuildError> {
        let wei = parse_units(input, GWEI_DECIMALS)
            .map_err(|reason| BuildError::invalid_gas_price(input, reason))?;
        if u128::try_from(wei).is_err() {
            return Err(BuildError::invalid_gas_price(input, "exceeds 128 bits"));
        }
        Ok(Self(wei))
    }

    /// Exact gwei rendering, e.g. `"1.5"` for `1_500_000_000` wei.
    pub fn to_gwei_string(&self) -> String {
        format_units(self.0, GWEI_DECIMALS)
    }
}

impl From<u64> for WeiAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for WeiAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for WeiAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 < U256::from(1_000_000u64) {
            write!(f, "{} wei", self.0)
        } else {
            write!(f, "{} gwei", self.to_gwei_string())
        }
    }
}

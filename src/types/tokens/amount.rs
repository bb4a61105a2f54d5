// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Raw token amount type

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::decimals::TokenDecimals;
use crate::errors::BuildError;
use crate::types::units::{format_units, parse_units};

/// Raw token amount (not normalized for decimals)
///
/// This represents the token amount as stored on-chain in the smallest unit
/// (e.g. 10 USDT is `10_000_000`). Conversion to and from the human-readable
/// form is exact: no floating-point value is ever involved.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use erc20_relay::{TokenAmount, TokenDecimals};
///
/// let amount = TokenAmount::from_decimal_str("10", TokenDecimals::USDT).unwrap();
/// assert_eq!(amount.as_u256(), U256::from(10_000_000u64));
/// assert_eq!(amount.to_decimal_string(TokenDecimals::USDT), "10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount(U256);

impl TokenAmount {
    /// Zero token amount
    pub const ZERO: Self = Self(U256::ZERO);

    /// Create a new token amount from U256
    pub const fn new(amount: U256) -> Self {
        Self(amount)
    }

    /// Get the inner U256 value
    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    /// Parse a human-readable amount (`"10"`, `"10.5"`) and scale it by
    /// `10^decimals`.
    ///
    /// # Errors
    ///
    /// [`BuildError::InvalidAmount`] when the input is negative, malformed,
    /// has more fractional digits than the token supports, or does not fit
    /// in 256 bits.
    pub fn from_decimal_str(input: &str, decimals: TokenDecimals) -> Result<Self, BuildError> {
        parse_units(input, decimals.as_u8())
            .map(Self)
            .map_err(|reason| BuildError::invalid_amount(input, reason))
    }

    /// Parse an amount already expressed in base units.
    ///
    /// # Examples
    ///
    /// ```
    /// use erc20_relay::TokenAmount;
    ///
    /// assert!(TokenAmount::from_base_units_str("10000000").is_ok());
    /// assert!(TokenAmount::from_base_units_str("1.5").is_err());
    /// assert!(TokenAmount::from_base_units_str("-1").is_err());
    /// ```
    pub fn from_base_units_str(input: &str) -> Result<Self, BuildError> {
        Self::from_decimal_str(input, TokenDecimals::new(0))
    }

    /// Render `amount / 10^decimals` as an exact decimal string with trailing
    /// fractional zeros removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use alloy_primitives::U256;
    /// use erc20_relay::{TokenAmount, TokenDecimals};
    ///
    /// let raw = TokenAmount::new(U256::from(100_000_000u64));
    /// assert_eq!(raw.to_decimal_string(TokenDecimals::USDC), "100");
    /// ```
    pub fn to_decimal_string(&self, decimals: TokenDecimals) -> String {
        format_units(self.0, decimals.as_u8())
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for TokenAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Strong types for configuration values
//!
//! These types ensure configuration values are not confused with
//! blockchain values (block numbers, gas prices, etc.).

use serde::{Deserialize, Serialize};

/// Maximum block range for a single log query
///
/// This prevents overloading RPC nodes with queries that are too large.
/// Requests spanning more blocks are refused rather than split.
///
/// # Examples
///
/// ```
/// use erc20_relay::MaxBlockRange;
///
/// let range = MaxBlockRange::DEFAULT;
/// assert_eq!(range.as_u64(), 5000);
/// assert!(range.allows(100, 5099));
/// assert!(!range.allows(100, 5100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaxBlockRange(u64);

impl MaxBlockRange {
    /// Default range (works on most public endpoints)
    pub const DEFAULT: Self = Self(5000);

    /// Very conservative for rate-limited RPCs
    pub const CONSERVATIVE: Self = Self(1000);

    /// For chains with generous RPC limits
    pub const GENEROUS: Self = Self(10000);

    /// Create a new max block range
    pub const fn new(blocks: u64) -> Self {
        Self(blocks)
    }

    /// Get the inner u64 value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Number of blocks in the inclusive range `[start, end]`, or 0 when
    /// `end < start`.
    pub fn span(start: u64, end: u64) -> u64 {
        if end < start {
            return 0;
        }
        (end - start).saturating_add(1)
    }

    /// Whether the inclusive range `[start, end]` fits within this limit.
    pub fn allows(&self, start: u64, end: u64) -> bool {
        Self::span(start, end) <= self.0
    }
}

impl Default for MaxBlockRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u64> for MaxBlockRange {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for MaxBlockRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} blocks", self.0)
    }
}

/// Gas limit attached to a transaction
///
/// # Examples
///
/// ```
/// use erc20_relay::GasLimit;
///
/// assert_eq!(GasLimit::ERC20_TRANSFER.as_u64(), 0x15f90);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GasLimit(u64);

impl GasLimit {
    /// Fixed limit used for ERC-20 `transfer` calls (90 000)
    pub const ERC20_TRANSFER: Self = Self(90_000);

    /// Create a new gas limit
    pub const fn new(gas: u64) -> Self {
        Self(gas)
    }

    /// Get the inner u64 value
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for GasLimit {
    fn default() -> Self {
        Self::ERC20_TRANSFER
    }
}

impl From<u64> for GasLimit {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for GasLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} gas", self.0)
    }
}

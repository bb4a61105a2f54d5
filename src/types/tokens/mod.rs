//! Strong types for token-related values
//!
//! # Type Relationships
//!
//! ```text
//! "10.5" (human-readable)
//!     |
//!     | TokenAmount::from_decimal_str(TokenDecimals)
//!     ↓
//! TokenAmount (U256, raw base units)
//!     |
//!     | to_decimal_string(TokenDecimals)
//!     ↓
//! "10.5"
//! ```

mod amount;
mod decimals;

pub use amount::TokenAmount;
pub use decimals::TokenDecimals;

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across erc20-relay.
//!
//! This module provides newtype wrappers for various domain concepts:
//! - Wei amounts (gas prices)
//! - Token amounts and decimals
//! - Configuration values (block ranges, gas limits)

pub mod config;
pub mod tokens;
pub(crate) mod units;
pub mod wei;

// Note: Public types are re-exported from lib.rs, not here

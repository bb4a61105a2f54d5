// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! ABI codec for a single contract interface.
//!
//! - [`ContractInterface`] holds parsed function and event declarations
//! - [`AbiValue`] is the closed set of values that flow through the codec
//! - [`DecodedFields`] is the ordered result of decoding a call or a log
//!
//! Encoding and decoding are methods on [`ContractInterface`]:
//! `encode_call`, `decode_call`, `decode_log` and `decode_any_log`.

mod codec;
mod interface;
mod value;

pub use interface::{ContractInterface, ERC20_DECLARATIONS};
pub use value::{AbiValue, DecodedFields};

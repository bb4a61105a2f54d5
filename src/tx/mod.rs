// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Transfer transaction lifecycle.
//!
//! [`TransactionBuilder`] produces an [`UnsignedTransaction`] whose signing
//! payload goes to an [`ExternalSigner`](crate::ExternalSigner). [`assemble`]
//! merges the returned signature, and [`Broadcaster`] submits the result and
//! polls for its receipt. [`TransferSession`] chains all of it.

mod assembler;
mod broadcaster;
mod builder;
mod session;

pub use assembler::{assemble, SignedTransaction};
pub use broadcaster::{Broadcaster, TxHandle};
pub use builder::{TransactionBuilder, UnsignedTransaction};
pub use session::{TransferRequest, TransferSession};

//! Span creation helpers for relay operations.
//!
//! Telemetry is kept out of business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a matching helper here.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(span)
//!     .await
//! }
//! ```

use alloy_primitives::{Address, BlockNumber, TxHash};
use tracing::{Level, Span};

/// Create span for fetching and decoding transfer logs.
///
/// Parent: None (root span for this operation)
#[inline]
pub(crate) fn fetch_transfers(
    chain_id: u64,
    contract: Address,
    from_block: BlockNumber,
    to_block: BlockNumber,
) -> Span {
    tracing::span!(
        Level::INFO,
        "relay.fetch_transfers",
        chain_id = chain_id,
        contract = %contract,
        from_block = from_block,
        to_block = to_block,
    )
}

/// Create span for building an unsigned transfer.
#[inline]
pub(crate) fn build_transfer(chain_id: u64, to: Address, nonce: u64) -> Span {
    tracing::debug_span!(
        "relay.build_transfer",
        chain_id = chain_id,
        to = %to,
        nonce = nonce,
    )
}

/// Create span for a device signing round-trip.
///
/// The payload itself is never recorded, only its length.
#[inline]
pub(crate) fn sign_transaction(path: &str, payload_len: usize) -> Span {
    tracing::span!(
        Level::INFO,
        "relay.sign_transaction",
        path = %path,
        payload_len = payload_len,
    )
}

/// Create span for submitting a signed transaction.
#[inline]
pub(crate) fn broadcast(chain_id: u64, tx_hash: TxHash) -> Span {
    tracing::span!(
        Level::INFO,
        "relay.broadcast",
        chain_id = chain_id,
        tx_hash = %tx_hash,
    )
}

/// Create span for polling a receipt.
///
/// Parent: send_transfer span when driven by a session
#[inline]
pub(crate) fn await_confirmation(tx_hash: TxHash, max_attempts: u32) -> Span {
    tracing::span!(
        Level::INFO,
        "relay.await_confirmation",
        tx_hash = %tx_hash,
        max_attempts = max_attempts,
        attempts = tracing::field::Empty,
    )
}

/// Create span for a full transfer lifecycle.
///
/// Parent: None (root span for this operation)
/// Children: build_transfer, sign_transaction, broadcast, await_confirmation
#[inline]
pub(crate) fn send_transfer(chain_id: u64, to: Address, amount: &str) -> Span {
    tracing::span!(
        Level::INFO,
        "relay.send_transfer",
        chain_id = chain_id,
        to = %to,
        amount = %amount,
    )
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Submission of signed transactions and receipt polling.

use std::time::Duration;

use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn, Instrument, Span};

use crate::errors::{BroadcastError, NetworkError, RpcError};
use crate::network::{NetworkClient, Receipt};
use crate::spans;

use super::SignedTransaction;

/// Handle to a submitted transaction.
///
/// Keep this around after a [`BroadcastError::ConfirmationTimeout`]: polling
/// can resume with it, while resubmitting would risk a duplicate spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxHandle {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Chain the transaction was sent to
    pub chain_id: u64,
}

/// Submits signed transactions and waits for their receipts.
#[derive(Debug)]
pub struct Broadcaster<'a, N: ?Sized> {
    network: &'a N,
}

impl<'a, N: NetworkClient + ?Sized> Broadcaster<'a, N> {
    /// Create a broadcaster over a network client.
    pub fn new(network: &'a N) -> Self {
        Self { network }
    }

    /// Submit `signed` once. Never retries.
    ///
    /// The returned handle carries the locally computed hash. If the node
    /// reports a different one, a warning is logged and the local hash is
    /// kept, since that is what the signed bytes actually hash to.
    ///
    /// # Errors
    ///
    /// - [`BroadcastError::BroadcastRejected`] if the node answered with an error
    /// - [`BroadcastError::Rpc`] if the request itself failed
    pub async fn broadcast(&self, signed: &SignedTransaction) -> Result<TxHandle, BroadcastError> {
        let tx_hash = signed.tx_hash();
        let chain_id = signed.unsigned().chain_id;

        async move {
            let reported = self
                .network
                .send_raw_transaction(signed.raw())
                .await
                .map_err(|e| match e {
                    NetworkError::Rejected { message, .. } => BroadcastError::BroadcastRejected {
                        tx_hash,
                        reason: message,
                    },
                    other => RpcError::send_raw_transaction_failed(tx_hash, other).into(),
                })?;

            if reported != tx_hash {
                warn!(
                    local = %tx_hash,
                    reported = %reported,
                    "Node reported a different transaction hash"
                );
            }

            info!("Transaction submitted");
            Ok(TxHandle { tx_hash, chain_id })
        }
        .instrument(spans::broadcast(chain_id, tx_hash))
        .await
    }

    /// Poll for the receipt of `handle`, at most `max_attempts` times with
    /// `poll_interval` between consecutive queries.
    ///
    /// A receipt with `success == false` is returned as-is; reverting is an
    /// outcome, not a failure of this call.
    ///
    /// # Errors
    ///
    /// - [`BroadcastError::ConfirmationTimeout`] once the budget is exhausted
    /// - [`BroadcastError::Rpc`] if a receipt query fails
    pub async fn await_confirmation(
        &self,
        handle: &TxHandle,
        poll_interval: Duration,
        max_attempts: u32,
    ) -> Result<Receipt, BroadcastError> {
        let tx_hash = handle.tx_hash;

        async move {
            for attempt in 1..=max_attempts {
                Span::current().record("attempts", attempt);

                let receipt = self
                    .network
                    .get_transaction_receipt(tx_hash)
                    .await
                    .map_err(|e| RpcError::get_receipt_failed(tx_hash, e))?;

                if let Some(receipt) = receipt {
                    if receipt.success {
                        info!(
                            block_number = receipt.block_number,
                            gas_used = receipt.gas_used,
                            "Transaction confirmed"
                        );
                    } else {
                        warn!(block_number = receipt.block_number, "Transaction reverted");
                    }
                    return Ok(receipt);
                }

                debug!(attempt, "Receipt not available yet");
                if attempt < max_attempts {
                    tokio::time::sleep(poll_interval).await;
                }
            }

            warn!("Confirmation attempts exhausted");
            Err(BroadcastError::ConfirmationTimeout {
                tx_hash,
                attempts: max_attempts,
            })
        }
        .instrument(spans::await_confirmation(tx_hash, max_attempts))
        .await
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end token transfer: derive sender, read nonce, build, sign, assemble,
//! broadcast and wait for the receipt.

use std::future::Future;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::{info, Instrument};

use crate::abi::ContractInterface;
use crate::config::RelayConfig;
use crate::errors::{AbiError, BuildError, RpcError, TransferError};
use crate::network::{NetworkClient, Receipt};
use crate::registry::NetworkRegistry;
use crate::signer::{sign_cancellable, DerivationPath, ExternalSigner};
use crate::spans;
use crate::types::tokens::TokenAmount;
use crate::types::wei::WeiAmount;

use super::{assemble, Broadcaster, SignedTransaction, TransactionBuilder, TxHandle};

/// What to send, where, and from which device account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Recipient of the tokens
    pub to: Address,
    /// Amount in whole tokens, e.g. `"10"` or `"10.5"`
    pub amount: String,
    /// Target chain
    pub chain_id: u64,
    /// Gas price in gwei, e.g. `"10"`
    pub gas_price_gwei: String,
    /// Device account to send from
    #[serde(default)]
    pub derivation_path: DerivationPath,
}

/// Drives a transfer through every stage against one network and one signer.
///
/// Nonces are read fresh for every transfer and not reserved. Running two
/// sessions for the same sender at once can produce conflicting nonces; the
/// second broadcast is then rejected by the node.
pub struct TransferSession<N, S> {
    network: N,
    signer: S,
    registry: NetworkRegistry,
    interface: ContractInterface,
    config: RelayConfig,
}

impl<N, S> TransferSession<N, S>
where
    N: NetworkClient,
    S: ExternalSigner,
{
    /// Create a session for the standard ERC-20 interface.
    pub fn new(
        network: N,
        signer: S,
        registry: NetworkRegistry,
        config: RelayConfig,
    ) -> Result<Self, AbiError> {
        Ok(Self::with_interface(
            network,
            signer,
            registry,
            ContractInterface::erc20()?,
            config,
        ))
    }

    /// Create a session for a custom token interface exposing
    /// `transfer(address,uint256)`.
    pub fn with_interface(
        network: N,
        signer: S,
        registry: NetworkRegistry,
        interface: ContractInterface,
        config: RelayConfig,
    ) -> Self {
        Self {
            network,
            signer,
            registry,
            interface,
            config,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Run a transfer to completion.
    pub async fn send(&self, request: &TransferRequest) -> Result<Receipt, TransferError> {
        self.send_cancellable(request, std::future::pending()).await
    }

    /// Run a transfer, aborting the signing step if `cancel` completes first.
    ///
    /// Cancellation only covers the device round-trip. Once a signature is
    /// obtained the transaction is broadcast.
    pub async fn send_cancellable<C>(
        &self,
        request: &TransferRequest,
        cancel: C,
    ) -> Result<Receipt, TransferError>
    where
        C: Future<Output = ()>,
    {
        let span = spans::send_transfer(request.chain_id, request.to, &request.amount);
        async move {
            let signed = self.prepare_cancellable(request, cancel).await?;
            let handle = self.submit(&signed).await?;
            self.confirm(&handle).await
        }
        .instrument(span)
        .await
    }

    /// Everything up to and including assembly, without touching the mempool.
    pub async fn prepare(&self, request: &TransferRequest) -> Result<SignedTransaction, TransferError> {
        self.prepare_cancellable(request, std::future::pending()).await
    }

    async fn prepare_cancellable<C>(
        &self,
        request: &TransferRequest,
        cancel: C,
    ) -> Result<SignedTransaction, TransferError>
    where
        C: Future<Output = ()>,
    {
        // Validate cheap inputs before bothering the device or the node.
        self.registry
            .resolve(request.chain_id)
            .map_err(BuildError::from)?;
        let amount = TokenAmount::from_decimal_str(&request.amount, self.config.token_decimals)?;
        let gas_price = WeiAmount::from_gwei_str(&request.gas_price_gwei)?;

        let path = &request.derivation_path;
        let sender = self.signer.get_address(path).await?;
        let nonce = self
            .network
            .get_transaction_count(sender)
            .await
            .map_err(|e| TransferError::Nonce(RpcError::get_transaction_count_failed(sender, e)))?;
        info!(sender = %sender, nonce, "Resolved sender account");

        let builder = TransactionBuilder::new(
            &self.registry,
            &self.interface,
            self.config.transfer_gas_limit,
        );
        let unsigned = builder.build_transfer(request.to, amount, nonce, gas_price, request.chain_id)?;

        let payload = unsigned.encode_for_signing();
        let signature = sign_cancellable(&self.signer, path, &payload, cancel).await?;

        Ok(assemble(unsigned, &signature)?)
    }

    /// Broadcast an already signed transaction.
    pub async fn submit(&self, signed: &SignedTransaction) -> Result<TxHandle, TransferError> {
        Ok(Broadcaster::new(&self.network).broadcast(signed).await?)
    }

    /// Wait for a submitted transaction using the configured poll budget.
    ///
    /// Safe to call again after a timeout.
    pub async fn confirm(&self, handle: &TxHandle) -> Result<Receipt, TransferError> {
        Ok(Broadcaster::new(&self.network)
            .await_confirmation(
                handle,
                self.config.poll_interval,
                self.config.max_poll_attempts,
            )
            .await?)
    }
}

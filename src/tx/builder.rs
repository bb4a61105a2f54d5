// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Unsigned ERC-20 transfer construction.

use alloy_consensus::{SignableTransaction, TxLegacy};
use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::abi::{AbiValue, ContractInterface};
use crate::errors::BuildError;
use crate::registry::{NetworkEntry, NetworkRegistry};
use crate::spans;
use crate::types::config::GasLimit;
use crate::types::tokens::TokenAmount;
use crate::types::wei::WeiAmount;

/// A legacy (EIP-155) transaction that has not been signed yet.
///
/// The nonce is whatever the caller read from the network; nothing here
/// reserves it, so two concurrent builds for the same sender can collide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTransaction {
    /// Sender account nonce
    pub nonce: u64,
    /// Gas price in wei
    pub gas_price: u128,
    /// Gas limit
    pub gas_limit: GasLimit,
    /// Token contract being called
    pub to: Address,
    /// Native value sent along, always zero for token transfers
    pub value: U256,
    /// EIP-155 chain id
    pub chain_id: u64,
    /// Call data
    pub data: Bytes,
}

impl UnsignedTransaction {
    pub(crate) fn to_legacy(&self) -> TxLegacy {
        TxLegacy {
            chain_id: Some(self.chain_id),
            nonce: self.nonce,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit.as_u64(),
            to: TxKind::Call(self.to),
            value: self.value,
            input: self.data.clone(),
        }
    }

    /// The EIP-155 signing payload
    /// `rlp([nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0])`.
    ///
    /// These are the exact bytes handed to the external signer.
    pub fn encode_for_signing(&self) -> Bytes {
        let mut buf = Vec::new();
        self.to_legacy().encode_for_signing(&mut buf);
        buf.into()
    }

    /// keccak256 of [`encode_for_signing`](Self::encode_for_signing).
    pub fn signing_hash(&self) -> B256 {
        self.to_legacy().signature_hash()
    }
}

/// Builds unsigned `transfer(to, amount)` transactions against the token
/// contract registered for a chain.
///
/// # Examples
///
/// ```
/// use alloy_primitives::{address, U256};
/// use erc20_relay::{ContractInterface, GasLimit, NetworkRegistry, TransactionBuilder};
///
/// let registry = NetworkRegistry::usdt();
/// let interface = ContractInterface::erc20().unwrap();
/// let builder = TransactionBuilder::new(&registry, &interface, GasLimit::ERC20_TRANSFER);
///
/// let tx = builder
///     .build(
///         address!("0x00000000000000000000000000000000000000aa"),
///         "10000000",
///         5,
///         "10",
///         1,
///     )
///     .unwrap();
/// assert_eq!(tx.gas_price, 10_000_000_000);
/// assert_eq!(tx.value, U256::ZERO);
/// assert_eq!(&tx.data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TransactionBuilder<'a> {
    registry: &'a NetworkRegistry,
    interface: &'a ContractInterface,
    gas_limit: GasLimit,
}

impl<'a> TransactionBuilder<'a> {
    /// Create a builder over a registry and the token's interface.
    pub fn new(
        registry: &'a NetworkRegistry,
        interface: &'a ContractInterface,
        gas_limit: GasLimit,
    ) -> Self {
        Self {
            registry,
            interface,
            gas_limit,
        }
    }

    /// Build a transfer of `amount` base units to `to`.
    ///
    /// `amount` is a non-negative integer string in the token's smallest
    /// unit. `gas_price_gwei` is a decimal gwei string, converted to wei
    /// exactly. Identical inputs always produce identical transactions.
    ///
    /// # Errors
    ///
    /// - [`BuildError::Registry`] if `chain_id` is not registered
    /// - [`BuildError::InvalidAmount`] if `amount` is not an integer in 256 bits
    /// - [`BuildError::InvalidGasPrice`] if the gas price has fractional wei or
    ///   is otherwise malformed
    pub fn build(
        &self,
        to: Address,
        amount: &str,
        nonce: u64,
        gas_price_gwei: &str,
        chain_id: u64,
    ) -> Result<UnsignedTransaction, BuildError> {
        let entry = self.registry.resolve(chain_id)?;
        let amount = TokenAmount::from_base_units_str(amount)?;
        let gas_price = WeiAmount::from_gwei_str(gas_price_gwei)?;
        self.build_for(entry, to, amount, nonce, gas_price)
    }

    /// Typed variant of [`build`](Self::build).
    pub fn build_transfer(
        &self,
        to: Address,
        amount: TokenAmount,
        nonce: u64,
        gas_price: WeiAmount,
        chain_id: u64,
    ) -> Result<UnsignedTransaction, BuildError> {
        let entry = self.registry.resolve(chain_id)?;
        self.build_for(entry, to, amount, nonce, gas_price)
    }

    fn build_for(
        &self,
        entry: &NetworkEntry,
        to: Address,
        amount: TokenAmount,
        nonce: u64,
        gas_price: WeiAmount,
    ) -> Result<UnsignedTransaction, BuildError> {
        let span = spans::build_transfer(entry.chain_id, to, nonce);
        let _guard = span.enter();

        let gas_price_wei = gas_price.as_u128().ok_or_else(|| {
            BuildError::invalid_gas_price(gas_price.to_gwei_string(), "exceeds 128 bits")
        })?;

        let data = self.interface.encode_call(
            "transfer",
            &[AbiValue::Address(to), AbiValue::Uint(amount.as_u256())],
        )?;

        debug!(
            contract = %entry.contract_address,
            amount = %amount,
            gas_price = %gas_price,
            gas_limit = %self.gas_limit,
            "Built unsigned transfer"
        );

        Ok(UnsignedTransaction {
            nonce,
            gas_price: gas_price_wei,
            gas_limit: self.gas_limit,
            to: entry.contract_address,
            value: U256::ZERO,
            chain_id: entry.chain_id,
            data,
        })
    }
}

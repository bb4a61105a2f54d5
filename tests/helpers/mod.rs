// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for erc20-relay integration tests
//!
//! Provides in-memory implementations of the network and device boundaries so
//! the full read and write paths run without a node or a hardware wallet.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Mutex;

use alloy_primitives::{address, b256, hex, keccak256, Address, Bytes, TxHash, B256, U256};
use async_trait::async_trait;
use erc20_relay::{
    DeviceRequest, DeviceResponse, DeviceTransport, NetworkClient, NetworkError, RawLog, Receipt,
    TransportFailure,
};
use tracing_subscriber::EnvFilter;

/// Install a test-scoped subscriber so spans and events from the crate are
/// rendered when `RUST_LOG` is set. Safe to call from every test.
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Address the mock device reports for every path.
pub const DEVICE_ADDRESS: Address = address!("0x9858effd232b4033e47d90003d41ec34ecaeda94");

/// `r` and `s` from the EIP-155 worked example; valid, low-s components.
pub const SIG_R: B256 = b256!("0x28ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276");
pub const SIG_S: B256 = b256!("0x67cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83");

/// keccak256("Transfer(address,address,uint256)")
pub fn transfer_topic() -> B256 {
    keccak256("Transfer(address,address,uint256)")
}

/// A well-formed `Transfer` log emitted by `contract`.
pub fn transfer_log(
    contract: Address,
    from: Address,
    to: Address,
    value: U256,
    block_number: u64,
    log_index: u64,
) -> RawLog {
    RawLog {
        address: contract,
        topics: vec![transfer_topic(), from.into_word(), to.into_word()],
        data: Bytes::from(value.to_be_bytes::<32>().to_vec()),
        block_number: Some(block_number),
        block_hash: Some(B256::with_last_byte(block_number as u8)),
        transaction_hash: Some(B256::left_padding_from(&log_index.to_be_bytes())),
        log_index: Some(log_index),
    }
}

/// How the mock node answers `eth_sendRawTransaction`.
#[derive(Debug, Clone)]
pub enum SendBehavior {
    /// Accept and report `keccak256(raw)`
    Accept,
    /// Accept but report a different hash
    AcceptWithHash(TxHash),
    /// JSON-RPC error response
    Reject(String),
    /// Connection-level failure
    TransportFailure,
}

/// Scripted in-memory [`NetworkClient`]
///
/// # Example
///
/// ```rust,ignore
/// let network = MockNetwork::new()
///     .with_logs(vec![transfer_log(contract, from, to, value, 100, 0)])
///     .with_nonce(7)
///     .with_receipt_after(3);
/// ```
pub struct MockNetwork {
    logs: Vec<RawLog>,
    fail_logs: bool,
    nonce: u64,
    fail_nonce: bool,
    send: SendBehavior,
    receipt_after: Option<u32>,
    receipt_success: bool,
    fail_receipt: bool,

    pub log_queries: Mutex<Vec<(Address, u64, u64)>>,
    pub nonce_queries: Mutex<Vec<Address>>,
    pub sent: Mutex<Vec<Vec<u8>>>,
    pub receipt_calls: AtomicU32,
}

impl MockNetwork {
    /// No logs, nonce 0, accepts transactions, never confirms
    pub fn new() -> Self {
        Self {
            logs: Vec::new(),
            fail_logs: false,
            nonce: 0,
            fail_nonce: false,
            send: SendBehavior::Accept,
            receipt_after: None,
            receipt_success: true,
            fail_receipt: false,
            log_queries: Mutex::new(Vec::new()),
            nonce_queries: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            receipt_calls: AtomicU32::new(0),
        }
    }

    /// Logs returned by every `get_logs`, before range filtering
    pub fn with_logs(mut self, logs: Vec<RawLog>) -> Self {
        self.logs = logs;
        self
    }

    pub fn with_failing_logs(mut self) -> Self {
        self.fail_logs = true;
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn with_failing_nonce(mut self) -> Self {
        self.fail_nonce = true;
        self
    }

    pub fn with_send(mut self, send: SendBehavior) -> Self {
        self.send = send;
        self
    }

    /// The receipt becomes available on the `n`th query
    pub fn with_receipt_after(mut self, n: u32) -> Self {
        self.receipt_after = Some(n);
        self
    }

    pub fn with_reverted_receipt(mut self) -> Self {
        self.receipt_success = false;
        self
    }

    pub fn with_failing_receipt(mut self) -> Self {
        self.fail_receipt = true;
        self
    }

    pub fn log_query_count(&self) -> usize {
        self.log_queries.lock().unwrap().len()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn receipt_call_count(&self) -> u32 {
        self.receipt_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockNetwork {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkClient for MockNetwork {
    async fn get_logs(
        &self,
        address: Address,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<RawLog>, NetworkError> {
        self.log_queries
            .lock()
            .unwrap()
            .push((address, from_block, to_block));
        if self.fail_logs {
            return Err(NetworkError::transport_msg("connection refused"));
        }
        Ok(self
            .logs
            .iter()
            .filter(|log| {
                log.block_number
                    .is_none_or(|n| (from_block..=to_block).contains(&n))
            })
            .cloned()
            .collect())
    }

    async fn get_transaction_count(&self, address: Address) -> Result<u64, NetworkError> {
        self.nonce_queries.lock().unwrap().push(address);
        if self.fail_nonce {
            return Err(NetworkError::transport_msg("timeout"));
        }
        Ok(self.nonce)
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, NetworkError> {
        self.sent.lock().unwrap().push(raw.to_vec());
        match &self.send {
            SendBehavior::Accept => Ok(keccak256(raw)),
            SendBehavior::AcceptWithHash(hash) => Ok(*hash),
            SendBehavior::Reject(message) => Err(NetworkError::rejected(-32000, message.clone())),
            SendBehavior::TransportFailure => Err(NetworkError::transport_msg("connection reset")),
        }
    }

    async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<Receipt>, NetworkError> {
        let call = self.receipt_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_receipt {
            return Err(NetworkError::transport_msg("bad gateway"));
        }
        match self.receipt_after {
            Some(n) if call >= n => Ok(Some(Receipt {
                tx_hash,
                block_number: 12_345,
                block_hash: B256::repeat_byte(0xab),
                success: self.receipt_success,
                gas_used: 51_000,
            })),
            _ => Ok(None),
        }
    }
}

/// Scripted hardware device speaking the [`DeviceRequest`]/[`DeviceResponse`]
/// protocol.
///
/// Signatures are canned; the device never looks at the payload it is
/// asked to sign, it only records it.
pub struct MockDevice {
    address_reply: Result<DeviceResponse, TransportFailure>,
    sign_reply: Result<DeviceResponse, TransportFailure>,
    pub requests: Mutex<Vec<DeviceRequest>>,
    pub sign_calls: AtomicUsize,
}

impl MockDevice {
    /// Reports [`DEVICE_ADDRESS`] and signs with `v`
    pub fn new(v: u64) -> Self {
        Self {
            address_reply: Ok(DeviceResponse::Address {
                address: DEVICE_ADDRESS.to_checksum(None),
            }),
            sign_reply: Ok(DeviceResponse::Signature {
                r: hex::encode_prefixed(SIG_R),
                s: hex::encode_prefixed(SIG_S),
                v,
            }),
            requests: Mutex::new(Vec::new()),
            sign_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_sign_reply(mut self, reply: Result<DeviceResponse, TransportFailure>) -> Self {
        self.sign_reply = reply;
        self
    }

    pub fn with_address_reply(mut self, reply: Result<DeviceResponse, TransportFailure>) -> Self {
        self.address_reply = reply;
        self
    }

    /// Payloads the device was asked to sign
    pub fn signed_payloads(&self) -> Vec<Bytes> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter_map(|request| match request {
                DeviceRequest::SignTransaction { payload, .. } => Some(payload.clone()),
                DeviceRequest::GetAddress { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl DeviceTransport for MockDevice {
    async fn exchange(&self, request: DeviceRequest) -> Result<DeviceResponse, TransportFailure> {
        let reply = match &request {
            DeviceRequest::GetAddress { .. } => self.address_reply.clone(),
            DeviceRequest::SignTransaction { .. } => {
                self.sign_calls.fetch_add(1, Ordering::SeqCst);
                self.sign_reply.clone()
            }
        };
        self.requests.lock().unwrap().push(request);
        reply
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! [`ExternalSigner`] over an opaque device request/response channel.
//!
//! The adapter performs no cryptography. It forwards requests, validates the
//! shape of every response and maps device outcomes onto [`SignerError`].

use alloy_primitives::{hex, Address, Bytes, B256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::path::DerivationPath;
use super::{DeviceSignature, ExternalSigner};
use crate::errors::SignerError;

/// Request sent to the signing device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DeviceRequest {
    /// Derive and return the address at `path`.
    GetAddress {
        /// Account path
        path: DerivationPath,
    },
    /// Sign the serialized unsigned transaction with the key at `path`.
    SignTransaction {
        /// Account path
        path: DerivationPath,
        /// EIP-155 signing payload
        payload: Bytes,
    },
}

/// Response returned by the signing device.
///
/// Byte fields are hex strings as the device reports them; they are only
/// trusted after [`DeviceSigner`] has validated them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DeviceResponse {
    /// Answer to [`DeviceRequest::GetAddress`]
    Address {
        /// 20-byte address, hex
        address: String,
    },
    /// Answer to [`DeviceRequest::SignTransaction`]
    Signature {
        /// 32-byte `r`, hex
        r: String,
        /// 32-byte `s`, hex
        s: String,
        /// Recovery value as reported by the device
        v: u64,
    },
    /// The operator declined on the device.
    Rejected,
    /// The device reported an internal failure.
    Failure {
        /// Device-provided message
        message: String,
    },
}

/// Failure of the channel to the device, as opposed to a device answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFailure {
    /// No device is connected, or the connection dropped.
    #[error("device disconnected: {0}")]
    Disconnected(String),

    /// The channel is up but the exchange failed.
    #[error("device I/O failed: {0}")]
    Io(String),
}

/// Opaque request/response channel to a hardware signer.
#[async_trait]
pub trait DeviceTransport: Send + Sync {
    /// Send one request and wait for its response.
    async fn exchange(&self, request: DeviceRequest) -> Result<DeviceResponse, TransportFailure>;
}

#[async_trait]
impl<T: DeviceTransport + ?Sized> DeviceTransport for std::sync::Arc<T> {
    async fn exchange(&self, request: DeviceRequest) -> Result<DeviceResponse, TransportFailure> {
        (**self).exchange(request).await
    }
}

/// [`ExternalSigner`] backed by a [`DeviceTransport`].
///
/// # Examples
///
/// ```rust,ignore
/// use erc20_relay::{DerivationPath, DeviceSigner, ExternalSigner};
///
/// let signer = DeviceSigner::new(usb_transport);
/// let sender = signer.get_address(&DerivationPath::ethereum_default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DeviceSigner<T> {
    transport: T,
}

impl<T: DeviceTransport> DeviceSigner<T> {
    /// Wrap a transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Access the wrapped transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn round_trip(&self, request: DeviceRequest) -> Result<DeviceResponse, SignerError> {
        match self.transport.exchange(request).await {
            Ok(DeviceResponse::Rejected) => {
                warn!("Request rejected on device");
                Err(SignerError::UserRejected)
            }
            Ok(DeviceResponse::Failure { message }) => Err(SignerError::device_error(message)),
            Ok(response) => Ok(response),
            Err(TransportFailure::Disconnected(details)) => {
                Err(SignerError::device_unavailable(details))
            }
            Err(TransportFailure::Io(details)) => Err(SignerError::device_error(details)),
        }
    }
}

#[async_trait]
impl<T: DeviceTransport> ExternalSigner for DeviceSigner<T> {
    async fn get_address(&self, path: &DerivationPath) -> Result<Address, SignerError> {
        debug!(%path, "Requesting address from device");
        let response = self
            .round_trip(DeviceRequest::GetAddress { path: path.clone() })
            .await?;

        match response {
            DeviceResponse::Address { address } => {
                let bytes = decode_hex("address", &address)?;
                if bytes.len() != 20 {
                    return Err(SignerError::device_error(format!(
                        "address must be 20 bytes, got {}",
                        bytes.len()
                    )));
                }
                Ok(Address::from_slice(&bytes))
            }
            other => Err(unexpected("address", &other)),
        }
    }

    async fn sign_transaction(
        &self,
        path: &DerivationPath,
        payload: &[u8],
    ) -> Result<DeviceSignature, SignerError> {
        debug!(%path, payload_len = payload.len(), "Requesting signature from device");
        let response = self
            .round_trip(DeviceRequest::SignTransaction {
                path: path.clone(),
                payload: Bytes::copy_from_slice(payload),
            })
            .await?;

        match response {
            DeviceResponse::Signature { r, s, v } => Ok(DeviceSignature {
                r: decode_word("r", &r)?,
                s: decode_word("s", &s)?,
                v,
            }),
            other => Err(unexpected("signature", &other)),
        }
    }
}

fn decode_hex(field: &str, value: &str) -> Result<Vec<u8>, SignerError> {
    hex::decode(value).map_err(|e| SignerError::device_error(format!("{field} is not valid hex: {e}")))
}

fn decode_word(field: &str, value: &str) -> Result<B256, SignerError> {
    let bytes = decode_hex(field, value)?;
    if bytes.len() != 32 {
        return Err(SignerError::device_error(format!(
            "{field} must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(B256::from_slice(&bytes))
}

fn unexpected(expected: &str, response: &DeviceResponse) -> SignerError {
    SignerError::device_error(format!("expected {expected} response, got {response:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedTransport {
        reply: Result<DeviceResponse, TransportFailure>,
        seen: Mutex<Vec<DeviceRequest>>,
    }

    impl ScriptedTransport {
        fn new(reply: Result<DeviceResponse, TransportFailure>) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl DeviceTransport for ScriptedTransport {
        async fn exchange(
            &self,
            request: DeviceRequest,
        ) -> Result<DeviceResponse, TransportFailure> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone()
        }
    }

    fn word(byte: u8) -> String {
        hex::encode([byte; 32])
    }

    #[tokio::test]
    async fn test_get_address() {
        let signer = DeviceSigner::new(ScriptedTransport::new(Ok(DeviceResponse::Address {
            address: format!("0x{}", "ab".repeat(20)),
        })));
        let address = signer
            .get_address(&DerivationPath::ethereum_default())
            .await
            .unwrap();
        assert_eq!(address, Address::repeat_byte(0xab));

        let seen = signer.transport().seen.lock().unwrap();
        assert_eq!(
            seen[0],
            DeviceRequest::GetAddress {
                path: DerivationPath::ethereum_default()
            }
        );
    }

    #[tokio::test]
    async fn test_short_address_is_device_error() {
        let signer = DeviceSigner::new(ScriptedTransport::new(Ok(DeviceResponse::Address {
            address: "0xabcd".to_string(),
        })));
        let err = signer
            .get_address(&DerivationPath::ethereum_default())
            .await
            .unwrap_err();
        assert!(matches!(err, SignerError::DeviceError { .. }));
    }

    #[tokio::test]
    async fn test_sign_transaction() {
        let signer = DeviceSigner::new(ScriptedTransport::new(Ok(DeviceResponse::Signature {
            r: word(0x11),
            s: word(0x22),
            v: 43,
        })));
        let signature = signer
            .sign_transaction(&DerivationPath::ethereum_default(), &[0xc0])
            .await
            .unwrap();
        assert_eq!(signature.r, B256::repeat_byte(0x11));
        assert_eq!(signature.s, B256::repeat_byte(0x22));
        assert_eq!(signature.v, 43);
    }

    #[tokio::test]
    async fn test_signature_component_validation() {
        for (r, s) in [
            (hex::encode([1u8; 31]), word(2)),
            (word(1), hex::encode([2u8; 33])),
            ("zz".repeat(32), word(2)),
        ] {
            let signer =
                DeviceSigner::new(ScriptedTransport::new(Ok(DeviceResponse::Signature {
                    r,
                    s,
                    v: 27,
                })));
            let err = signer
                .sign_transaction(&DerivationPath::ethereum_default(), &[0xc0])
                .await
                .unwrap_err();
            assert!(matches!(err, SignerError::DeviceError { .. }), "{err:?}");
        }
    }

    #[tokio::test]
    async fn test_device_outcomes_map_to_errors() {
        let cases = [
            (Ok(DeviceResponse::Rejected), SignerError::UserRejected),
            (
                Ok(DeviceResponse::Failure {
                    message: "app not open".to_string(),
                }),
                SignerError::device_error("app not open"),
            ),
            (
                Err(TransportFailure::Disconnected("usb unplugged".to_string())),
                SignerError::device_unavailable("usb unplugged"),
            ),
        ];

        for (reply, expected) in cases {
            let signer = DeviceSigner::new(ScriptedTransport::new(reply));
            let err = signer
                .sign_transaction(&DerivationPath::ethereum_default(), &[0xc0])
                .await
                .unwrap_err();
            assert_eq!(err, expected);
        }
    }

    #[tokio::test]
    async fn test_mismatched_response_kind() {
        let signer = DeviceSigner::new(ScriptedTransport::new(Ok(DeviceResponse::Address {
            address: format!("0x{}", "ab".repeat(20)),
        })));
        let err = signer
            .sign_transaction(&DerivationPath::ethereum_default(), &[0xc0])
            .await
            .unwrap_err();
        assert!(matches!(err, SignerError::DeviceError { .. }));
    }

    #[test]
    fn test_request_wire_format() {
        let request = DeviceRequest::SignTransaction {
            path: DerivationPath::ethereum_default(),
            payload: Bytes::from_static(&[0xc0]),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(
            json,
            r#"{"type":"signTransaction","path":"44'/60'/0'/0/0","payload":"0xc0"}"#
        );
    }
}

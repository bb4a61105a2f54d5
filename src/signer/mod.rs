// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! External signer boundary.
//!
//! The private key never enters this process. Everything that needs a
//! signature goes through [`ExternalSigner`]; [`DeviceSigner`] implements it
//! over a hardware device channel.

mod device;
mod path;

use std::future::Future;

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn, Instrument};

use crate::errors::SignerError;
use crate::spans;

pub use device::{DeviceRequest, DeviceResponse, DeviceSigner, DeviceTransport, TransportFailure};
pub use path::{DerivationPath, HARDENED_BIT};

/// Signature components exactly as returned by a signer.
///
/// Nothing about `v` is assumed here; the assembler decides which encodings
/// it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSignature {
    /// `r` component
    pub r: B256,
    /// `s` component
    pub s: B256,
    /// Recovery value
    pub v: u64,
}

/// Capability to derive addresses and sign transactions without exposing keys.
#[async_trait]
pub trait ExternalSigner: Send + Sync {
    /// Address of the account at `path`.
    async fn get_address(&self, path: &DerivationPath) -> Result<Address, SignerError>;

    /// Sign an EIP-155 signing payload with the key at `path`.
    async fn sign_transaction(
        &self,
        path: &DerivationPath,
        payload: &[u8],
    ) -> Result<DeviceSignature, SignerError>;
}

#[async_trait]
impl<T: ExternalSigner + ?Sized> ExternalSigner for std::sync::Arc<T> {
    async fn get_address(&self, path: &DerivationPath) -> Result<Address, SignerError> {
        (**self).get_address(path).await
    }

    async fn sign_transaction(
        &self,
        path: &DerivationPath,
        payload: &[u8],
    ) -> Result<DeviceSignature, SignerError> {
        (**self).sign_transaction(path, payload).await
    }
}

/// Sign `payload`, giving up with [`SignerError::Cancelled`] as soon as
/// `cancel` completes.
///
/// A cancelled request is not retried. If `cancel` is already complete when
/// this is called, the device is never asked.
///
/// # Examples
///
/// ```rust,ignore
/// use erc20_relay::sign_cancellable;
/// use tokio::sync::oneshot;
///
/// let (abort, aborted) = oneshot::channel::<()>();
/// let signature = sign_cancellable(&signer, &path, &payload, async {
///     let _ = aborted.await;
/// })
/// .await?;
/// ```
pub async fn sign_cancellable<S, C>(
    signer: &S,
    path: &DerivationPath,
    payload: &[u8],
    cancel: C,
) -> Result<DeviceSignature, SignerError>
where
    S: ExternalSigner + ?Sized,
    C: Future<Output = ()>,
{
    let span = spans::sign_transaction(&path.to_string(), payload.len());
    async move {
        tokio::select! {
            biased;
            _ = cancel => {
                warn!("Signing cancelled by operator");
                Err(SignerError::Cancelled)
            }
            result = signer.sign_transaction(path, payload) => {
                if result.is_ok() {
                    info!("Device returned signature");
                }
                result
            }
        }
    }
    .instrument(span)
    .await
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the external signer boundary.

/// Errors surfaced by an [`ExternalSigner`](crate::ExternalSigner).
///
/// These are shown to the operator verbatim. `DeviceUnavailable` may be
/// retried once the device is reconnected; `UserRejected` and `Cancelled`
/// end the attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignerError {
    /// The device transport is not connected.
    #[error("Signing device unavailable: {details}")]
    DeviceUnavailable {
        /// Transport-level details
        details: String,
    },

    /// The operator declined the request on the device.
    #[error("Request rejected on device")]
    UserRejected,

    /// The device answered with something that is not a valid response.
    #[error("Device error: {details}")]
    DeviceError {
        /// What was wrong with the response
        details: String,
    },

    /// The operator cancelled the request before the device answered.
    #[error("Signing request cancelled")]
    Cancelled,

    /// The derivation path string is not a valid BIP-32 path.
    #[error("Invalid derivation path `{path}`: {details}")]
    InvalidPath {
        /// Offending path
        path: String,
        /// Why it was rejected
        details: String,
    },
}

impl SignerError {
    /// Create a `DeviceUnavailable` error.
    pub fn device_unavailable(details: impl Into<String>) -> Self {
        SignerError::DeviceUnavailable {
            details: details.into(),
        }
    }

    /// Create a `DeviceError` error.
    pub fn device_error(details: impl Into<String>) -> Self {
        SignerError::DeviceError {
            details: details.into(),
        }
    }

    /// Create an `InvalidPath` error.
    pub fn invalid_path(path: impl Into<String>, details: impl Into<String>) -> Self {
        SignerError::InvalidPath {
            path: path.into(),
            details: details.into(),
        }
    }

    /// Whether the same request may be attempted again after operator action.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SignerError::DeviceUnavailable { .. })
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the ABI codec.

/// Errors raised while declaring, encoding against or decoding with a
/// [`ContractInterface`](crate::ContractInterface).
///
/// `UnknownMethod`, `UnknownEvent` and `TypeMismatch` are caller logic errors
/// and abort the operation. `Decode` on a single log is recoverable: the log
/// fetcher skips the entry and reports it.
///
/// # Examples
///
/// ```rust
/// use erc20_relay::{AbiError, ContractInterface};
///
/// let interface = ContractInterface::erc20().unwrap();
/// match interface.encode_call("mint", &[]) {
///     Err(AbiError::UnknownMethod { name }) => assert_eq!(name, "mint"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    /// The function is not declared in the interface.
    #[error("Unknown method: {name}")]
    UnknownMethod {
        /// Requested function name
        name: String,
    },

    /// The event is not declared in the interface.
    #[error("Unknown event: {name}")]
    UnknownEvent {
        /// Requested event name
        name: String,
    },

    /// No declared function has this 4-byte selector.
    #[error("Unknown function selector: {selector}")]
    UnknownSelector {
        /// Hex-encoded selector
        selector: String,
    },

    /// An argument does not satisfy the declared parameter type.
    #[error("Type mismatch for {function}: {details}")]
    TypeMismatch {
        /// Function being encoded
        function: String,
        /// What did not match
        details: String,
    },

    /// Raw data is inconsistent with the declared shape.
    #[error("Failed to decode {target}: {details}")]
    Decode {
        /// Function or event being decoded
        target: String,
        /// Why decoding failed
        details: String,
    },

    /// Two functions or two events share a name.
    #[error("Duplicate declaration: {name}")]
    DuplicateDeclaration {
        /// The repeated name
        name: String,
    },

    /// A declaration could not be parsed or uses an unsupported type.
    #[error("Invalid declaration `{declaration}`: {details}")]
    InvalidDeclaration {
        /// Offending declaration text
        declaration: String,
        /// Why it was rejected
        details: String,
    },
}

impl AbiError {
    /// Create an `UnknownMethod` error.
    pub fn unknown_method(name: impl Into<String>) -> Self {
        AbiError::UnknownMethod { name: name.into() }
    }

    /// Create an `UnknownEvent` error.
    pub fn unknown_event(name: impl Into<String>) -> Self {
        AbiError::UnknownEvent { name: name.into() }
    }

    /// Create a `TypeMismatch` error.
    pub fn type_mismatch(function: impl Into<String>, details: impl Into<String>) -> Self {
        AbiError::TypeMismatch {
            function: function.into(),
            details: details.into(),
        }
    }

    /// Create a `Decode` error.
    pub fn decode(target: impl Into<String>, details: impl Into<String>) -> Self {
        AbiError::Decode {
            target: target.into(),
            details: details.into(),
        }
    }

    /// Create an `InvalidDeclaration` error.
    pub fn invalid_declaration(
        declaration: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        AbiError::InvalidDeclaration {
            declaration: declaration.into(),
            details: details.into(),
        }
    }
}

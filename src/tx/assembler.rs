// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Merging a device signature into a broadcastable transaction.

use alloy_consensus::transaction::RlpEcdsaEncodableTx;
use alloy_primitives::{keccak256, uint, Bytes, Signature, TxHash, U256};
use tracing::debug;

use crate::errors::AssembleError;
use crate::signer::DeviceSignature;

use super::UnsignedTransaction;

/// Order of the secp256k1 group.
const SECP256K1_ORDER: U256 =
    uint!(0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141_U256);

/// Largest `s` accepted after EIP-2.
const SECP256K1_HALF_ORDER: U256 =
    uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

/// A signed transaction ready for `eth_sendRawTransaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    unsigned: UnsignedTransaction,
    signature: Signature,
    raw: Bytes,
    tx_hash: TxHash,
}

impl SignedTransaction {
    /// The transaction that was signed.
    pub fn unsigned(&self) -> &UnsignedTransaction {
        &self.unsigned
    }

    /// Normalized signature (`y_parity` rather than a raw `v`).
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// `rlp([nonce, gasPrice, gasLimit, to, value, data, v, r, s])`.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// keccak256 of [`raw`](Self::raw).
    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// EIP-155 `v` as it appears in the encoding.
    ///
    /// Wider than the chain id so any `u64` chain fits.
    pub fn v(&self) -> u128 {
        u128::from(self.unsigned.chain_id) * 2 + 35 + u128::from(self.signature.v())
    }
}

/// Combine `unsigned` with a signature returned by the device.
///
/// `v` may arrive as a bare parity (0/1), in pre-EIP-155 form (27/28) or in
/// EIP-155 form (`chain_id * 2 + 35/36`). All three produce the same bytes.
///
/// # Errors
///
/// - [`AssembleError::ChainMismatch`] if an EIP-155 `v` encodes another chain
/// - [`AssembleError::InvalidSignature`] for any other `v`, a zero or
///   out-of-range `r`, or a zero or high `s`
pub fn assemble(
    unsigned: UnsignedTransaction,
    signature: &DeviceSignature,
) -> Result<SignedTransaction, AssembleError> {
    let y_parity = parity_from_v(signature.v, unsigned.chain_id)?;

    let r = U256::from_be_bytes(signature.r.0);
    let s = U256::from_be_bytes(signature.s.0);
    if r.is_zero() || r >= SECP256K1_ORDER {
        return Err(AssembleError::invalid_signature("r is outside the curve order"));
    }
    if s.is_zero() {
        return Err(AssembleError::invalid_signature("s is zero"));
    }
    if s > SECP256K1_HALF_ORDER {
        return Err(AssembleError::invalid_signature(
            "s is in the upper half of the curve order",
        ));
    }

    let signature = Signature::new(r, s, y_parity);
    let mut buf = Vec::new();
    unsigned.to_legacy().rlp_encode_signed(&signature, &mut buf);
    let tx_hash = keccak256(&buf);

    debug!(tx_hash = %tx_hash, len = buf.len(), "Assembled signed transaction");

    Ok(SignedTransaction {
        unsigned,
        signature,
        raw: buf.into(),
        tx_hash,
    })
}

fn parity_from_v(v: u64, chain_id: u64) -> Result<bool, AssembleError> {
    match v {
        0 | 1 => Ok(v == 1),
        27 | 28 => Ok(v == 28),
        v if v >= 35 => {
            let signed_for = (v - 35) / 2;
            if signed_for != chain_id {
                return Err(AssembleError::ChainMismatch {
                    expected: chain_id,
                    signed_for,
                });
            }
            Ok((v - 35) % 2 == 1)
        }
        other => Err(AssembleError::invalid_signature(format!(
            "unsupported recovery value v={other}"
        ))),
    }
}

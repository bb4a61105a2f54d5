// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Typed ABI values and ordered decoded field lists.
//!
//! [`AbiValue`] is a deliberately small closed set: the contract interfaces
//! this crate talks to only use unsigned integers, addresses, byte strings,
//! booleans and aggregates of those.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{hex, Address, Bytes, B256, U256};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A single ABI value.
///
/// Fixed-size `bytesN` values are carried as [`AbiValue::Bytes`] of exactly
/// `N` bytes. Arrays, fixed arrays and tuples are all [`AbiValue::List`]; the
/// declared type decides how a list is encoded.
///
/// Serializes to JSON as a decimal string for integers, a checksummed string
/// for addresses, `0x` hex for bytes, a boolean and an array respectively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    /// Unsigned integer of any declared width
    Uint(U256),
    /// 20-byte account or contract address
    Address(Address),
    /// Dynamic `bytes` or fixed `bytesN`
    Bytes(Bytes),
    /// Boolean
    Bool(bool),
    /// Array, fixed array or tuple
    List(Vec<AbiValue>),
}

impl AbiValue {
    /// The unsigned integer, if this is a `Uint`.
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            AbiValue::Uint(value) => Some(*value),
            _ => None,
        }
    }

    /// The address, if this is an `Address`.
    pub fn as_address(&self) -> Option<Address> {
        match self {
            AbiValue::Address(address) => Some(*address),
            _ => None,
        }
    }

    /// Short kind name used in mismatch messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AbiValue::Uint(_) => "uint",
            AbiValue::Address(_) => "address",
            AbiValue::Bytes(_) => "bytes",
            AbiValue::Bool(_) => "bool",
            AbiValue::List(_) => "list",
        }
    }

    /// Convert into the dynamic alloy value for `ty`, checking that the value
    /// fits the declared type.
    pub(crate) fn to_dyn(&self, ty: &DynSolType) -> Result<DynSolValue, String> {
        match (self, ty) {
            (AbiValue::Uint(value), DynSolType::Uint(bits)) => {
                if value.bit_len() > *bits {
                    return Err(format!("value {value} does not fit in uint{bits}"));
                }
                Ok(DynSolValue::Uint(*value, *bits))
            }
            (AbiValue::Address(address), DynSolType::Address) => {
                Ok(DynSolValue::Address(*address))
            }
            (AbiValue::Bool(flag), DynSolType::Bool) => Ok(DynSolValue::Bool(*flag)),
            (AbiValue::Bytes(bytes), DynSolType::Bytes) => Ok(DynSolValue::Bytes(bytes.to_vec())),
            (AbiValue::Bytes(bytes), DynSolType::FixedBytes(size)) => {
                if bytes.len() != *size {
                    return Err(format!(
                        "bytes{size} expects {size} bytes, got {}",
                        bytes.len()
                    ));
                }
                let mut word = B256::ZERO;
                word[..*size].copy_from_slice(bytes);
                Ok(DynSolValue::FixedBytes(word, *size))
            }
            (AbiValue::List(items), DynSolType::Array(inner)) => items
                .iter()
                .map(|item| item.to_dyn(inner))
                .collect::<Result<Vec<_>, _>>()
                .map(DynSolValue::Array),
            (AbiValue::List(items), DynSolType::FixedArray(inner, len)) => {
                if items.len() != *len {
                    return Err(format!(
                        "fixed array expects {len} elements, got {}",
                        items.len()
                    ));
                }
                items
                    .iter()
                    .map(|item| item.to_dyn(inner))
                    .collect::<Result<Vec<_>, _>>()
                    .map(DynSolValue::FixedArray)
            }
            (AbiValue::List(items), DynSolType::Tuple(types)) => {
                if items.len() != types.len() {
                    return Err(format!(
                        "tuple expects {} components, got {}",
                        types.len(),
                        items.len()
                    ));
                }
                items
                    .iter()
                    .zip(types)
                    .map(|(item, ty)| item.to_dyn(ty))
                    .collect::<Result<Vec<_>, _>>()
                    .map(DynSolValue::Tuple)
            }
            (value, ty) => Err(format!(
                "expected {}, got {}",
                ty.sol_type_name(),
                value.kind()
            )),
        }
    }

    /// Convert a decoded alloy value back into the closed value set.
    pub(crate) fn from_dyn(value: DynSolValue) -> Result<Self, String> {
        match value {
            DynSolValue::Uint(value, _) => Ok(AbiValue::Uint(value)),
            DynSolValue::Address(address) => Ok(AbiValue::Address(address)),
            DynSolValue::Bool(flag) => Ok(AbiValue::Bool(flag)),
            DynSolValue::Bytes(bytes) => Ok(AbiValue::Bytes(bytes.into())),
            DynSolValue::FixedBytes(word, size) => {
                Ok(AbiValue::Bytes(Bytes::copy_from_slice(&word[..size])))
            }
            DynSolValue::Array(items)
            | DynSolValue::FixedArray(items)
            | DynSolValue::Tuple(items) => items
                .into_iter()
                .map(Self::from_dyn)
                .collect::<Result<Vec<_>, _>>()
                .map(AbiValue::List),
            other => Err(format!("unsupported decoded value {other:?}")),
        }
    }
}

impl From<U256> for AbiValue {
    fn from(value: U256) -> Self {
        AbiValue::Uint(value)
    }
}

impl From<Address> for AbiValue {
    fn from(value: Address) -> Self {
        AbiValue::Address(value)
    }
}

impl From<bool> for AbiValue {
    fn from(value: bool) -> Self {
        AbiValue::Bool(value)
    }
}

impl From<Bytes> for AbiValue {
    fn from(value: Bytes) -> Self {
        AbiValue::Bytes(value)
    }
}

impl std::fmt::Display for AbiValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbiValue::Uint(value) => write!(f, "{value}"),
            AbiValue::Address(address) => write!(f, "{}", address.to_checksum(None)),
            AbiValue::Bytes(bytes) => write!(f, "{}", hex::encode_prefixed(bytes)),
            AbiValue::Bool(flag) => write!(f, "{flag}"),
            AbiValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

impl Serialize for AbiValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AbiValue::Uint(value) => serializer.serialize_str(&value.to_string()),
            AbiValue::Address(address) => serializer.serialize_str(&address.to_checksum(None)),
            AbiValue::Bytes(bytes) => serializer.serialize_str(&hex::encode_prefixed(bytes)),
            AbiValue::Bool(flag) => serializer.serialize_bool(*flag),
            AbiValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Decoded parameters of one call or log, in declaration order.
///
/// Parameters without a declared name are keyed by their position (`"0"`,
/// `"1"`, ...). Serializes as a JSON object preserving that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedFields(Vec<(String, AbiValue)>);

impl DecodedFields {
    /// Create from ordered `(name, value)` pairs.
    pub fn new(fields: Vec<(String, AbiValue)>) -> Self {
        Self(fields)
    }

    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&AbiValue> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Iterate over `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AbiValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    /// The values alone, in declaration order.
    pub fn values(&self) -> Vec<AbiValue> {
        self.0.iter().map(|(_, value)| value.clone()).collect()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for DecodedFields {
    type Item = (String, AbiValue);
    type IntoIter = std::vec::IntoIter<(String, AbiValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for DecodedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

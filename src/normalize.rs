// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Display normalization of decoded event values.
//!
//! [`normalize_values`] is a pure transform from [`DecodedFields`] to
//! [`NormalizedFields`]: integers become exact decimal strings scaled by the
//! token's decimals, everything else passes through unchanged.

use alloy_primitives::{hex, Address, Bytes};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::abi::{AbiValue, DecodedFields};
use crate::types::tokens::{TokenAmount, TokenDecimals};

/// A decoded value after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedValue {
    /// An integer scaled by `10^decimals`, as an exact decimal string
    Amount(String),
    /// Address, unchanged
    Address(Address),
    /// Bytes, unchanged
    Bytes(Bytes),
    /// Boolean, unchanged
    Bool(bool),
    /// Aggregate with each element normalized
    List(Vec<NormalizedValue>),
}

impl NormalizedValue {
    /// The decimal string, if this is an `Amount`.
    pub fn as_amount(&self) -> Option<&str> {
        match self {
            NormalizedValue::Amount(amount) => Some(amount),
            _ => None,
        }
    }
}

impl Serialize for NormalizedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NormalizedValue::Amount(amount) => serializer.serialize_str(amount),
            NormalizedValue::Address(address) => {
                serializer.serialize_str(&address.to_checksum(None))
            }
            NormalizedValue::Bytes(bytes) => serializer.serialize_str(&hex::encode_prefixed(bytes)),
            NormalizedValue::Bool(flag) => serializer.serialize_bool(*flag),
            NormalizedValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Normalized fields in declaration order. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFields(Vec<(String, NormalizedValue)>);

impl NormalizedFields {
    /// Look up a field by name.
    pub fn get(&self, name: &str) -> Option<&NormalizedValue> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Field names in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(key, _)| key.as_str())
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NormalizedValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
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

impl Serialize for NormalizedFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Keys that only mirror positional access (`"0"`, `"1"`, `"length"`) and
/// carry no information of their own.
pub fn is_synthetic_key(key: &str) -> bool {
    key == "length" || (!key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()))
}

/// Normalize decoded fields for display.
///
/// Synthetic keys (see [`is_synthetic_key`]) are dropped, so parameters that
/// were declared without a name do not survive normalization. Every integer is
/// replaced by the exact decimal string of `value / 10^decimals` with trailing
/// fractional zeros trimmed.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use erc20_relay::{normalize_values, AbiValue, DecodedFields, TokenDecimals};
///
/// let fields = DecodedFields::new(vec![
///     ("0".to_string(), AbiValue::Uint(U256::from(100_000_000u64))),
///     ("value".to_string(), AbiValue::Uint(U256::from(100_000_000u64))),
/// ]);
/// let normalized = normalize_values(&fields, TokenDecimals::USDT);
/// assert_eq!(normalized.len(), 1);
/// assert_eq!(normalized.get("value").unwrap().as_amount(), Some("100"));
/// ```
pub fn normalize_values(fields: &DecodedFields, decimals: TokenDecimals) -> NormalizedFields {
    NormalizedFields(
        fields
            .iter()
            .filter(|(key, _)| !is_synthetic_key(key))
            .map(|(key, value)| (key.to_string(), normalize_value(value, decimals)))
            .collect(),
    )
}

/// Normalize a single value.
pub fn normalize_value(value: &AbiValue, decimals: TokenDecimals) -> NormalizedValue {
    match value {
        AbiValue::Uint(raw) => {
            NormalizedValue::Amount(TokenAmount::new(*raw).to_decimal_string(decimals))
        }
        AbiValue::Address(address) => NormalizedValue::Address(*address),
        AbiValue::Bytes(bytes) => NormalizedValue::Bytes(bytes.clone()),
        AbiValue::Bool(flag) => NormalizedValue::Bool(*flag),
        AbiValue::List(items) => NormalizedValue::List(
            items
                .iter()
                .map(|item| normalize_value(item, decimals))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};

    fn transfer_fields(value: u64) -> DecodedFields {
        DecodedFields::new(vec![
            (
                "from".to_string(),
                AbiValue::Address(address!("0x1111111111111111111111111111111111111111")),
            ),
            (
                "to".to_string(),
                AbiValue::Address(address!("0x2222222222222222222222222222222222222222")),
            ),
            ("value".to_string(), AbiValue::Uint(U256::from(value))),
        ])
    }

    #[test]
    fn test_scales_integers_exactly() {
        let normalized = normalize_values(&transfer_fields(100_000_000), TokenDecimals::USDT);
        assert_eq!(normalized.get("value").unwrap().as_amount(), Some("100"));

        let normalized = normalize_values(&transfer_fields(1), TokenDecimals::USDT);
        assert_eq!(normalized.get("value").unwrap().as_amount(), Some("0.000001"));

        let normalized = normalize_values(&transfer_fields(0), TokenDecimals::USDT);
        assert_eq!(normalized.get("value").unwrap().as_amount(), Some("0"));
    }

    #[test]
    fn test_addresses_pass_through() {
        let normalized = normalize_values(&transfer_fields(5), TokenDecimals::USDT);
        assert_eq!(
            normalized.get("from"),
            Some(&NormalizedValue::Address(address!(
                "0x1111111111111111111111111111111111111111"
            )))
        );
    }

    #[test]
    fn test_synthetic_keys_are_dropped() {
        let fields = DecodedFields::new(vec![
            ("0".to_string(), AbiValue::Bool(true)),
            ("12".to_string(), AbiValue::Bool(true)),
            ("length".to_string(), AbiValue::Uint(U256::from(3u8))),
            ("from0".to_string(), AbiValue::Bool(false)),
        ]);
        let normalized = normalize_values(&fields, TokenDecimals::USDT);
        let keys: Vec<_> = normalized.keys().collect();
        assert_eq!(keys, vec!["from0"]);
    }

    #[test]
    fn test_is_synthetic_key() {
        assert!(is_synthetic_key("0"));
        assert!(is_synthetic_key("length"));
        assert!(!is_synthetic_key(""));
        assert!(!is_synthetic_key("value"));
        assert!(!is_synthetic_key("1a"));
    }

    #[test]
    fn test_lists_are_normalized_recursively() {
        let value = AbiValue::List(vec![
            AbiValue::Uint(U256::from(1_500_000u64)),
            AbiValue::Bool(true),
        ]);
        assert_eq!(
            normalize_value(&value, TokenDecimals::USDT),
            NormalizedValue::List(vec![
                NormalizedValue::Amount("1.5".to_string()),
                NormalizedValue::Bool(true),
            ])
        );
    }

    #[test]
    fn test_serializes_in_declaration_order() {
        let normalized = normalize_values(&transfer_fields(100_000_000), TokenDecimals::USDT);
        let json = serde_json::to_string(&normalized).unwrap();
        assert_eq!(
            json,
            r#"{"from":"0x1111111111111111111111111111111111111111","to":"0x2222222222222222222222222222222222222222","value":"100"}"#
        );
    }
}

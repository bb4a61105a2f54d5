// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Call-data encoding and log decoding against a [`ContractInterface`].
//!
//! Decoding is strict. A log must carry exactly one topic per indexed
//! parameter plus the signature topic, and the data payload must be
//! byte-for-byte identical to the canonical encoding of what it decodes to.
//! Integers must fit their declared width whether they sit in a topic or in
//! the data. Malformed input is reported as [`AbiError::Decode`]; no
//! path panics or truncates.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{hex, Address, Bytes, B256, U256};

use super::interface::{ContractInterface, EventDecl};
use super::value::{AbiValue, DecodedFields};
use crate::errors::AbiError;

impl ContractInterface {
    /// Encode a call to `name`: the 4-byte selector followed by the ABI
    /// encoding of `args`.
    ///
    /// # Errors
    ///
    /// - [`AbiError::UnknownMethod`] if `name` is not declared
    /// - [`AbiError::TypeMismatch`] if the argument count differs, a value has
    ///   the wrong kind, an integer exceeds its declared width or a `bytesN`
    ///   value has the wrong length
    ///
    /// # Examples
    ///
    /// ```
    /// use alloy_primitives::{address, U256};
    /// use erc20_relay::{AbiValue, ContractInterface};
    ///
    /// let interface = ContractInterface::erc20().unwrap();
    /// let data = interface
    ///     .encode_call(
    ///         "transfer",
    ///         &[
    ///             AbiValue::Address(address!("0x00000000000000000000000000000000000000aa")),
    ///             AbiValue::Uint(U256::from(10_000_000u64)),
    ///         ],
    ///     )
    ///     .unwrap();
    /// assert_eq!(&data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
    /// assert_eq!(data.len(), 4 + 64);
    /// ```
    pub fn encode_call(&self, name: &str, args: &[AbiValue]) -> Result<Bytes, AbiError> {
        let function = self.function(name)?;

        if args.len() != function.inputs.len() {
            return Err(AbiError::type_mismatch(
                name,
                format!(
                    "expected {} arguments, got {}",
                    function.inputs.len(),
                    args.len()
                ),
            ));
        }

        let values = args
            .iter()
            .zip(&function.inputs)
            .enumerate()
            .map(|(index, (arg, ty))| {
                arg.to_dyn(ty).map_err(|details| {
                    AbiError::type_mismatch(
                        name,
                        format!("argument `{}`: {details}", function.input_name(index)),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let encoded = DynSolValue::Tuple(values).abi_encode_params();
        let mut data = Vec::with_capacity(4 + encoded.len());
        data.extend_from_slice(function.selector.as_slice());
        data.extend_from_slice(&encoded);
        Ok(data.into())
    }

    /// Decode call-data produced by [`encode_call`](Self::encode_call) back
    /// into the function name and its arguments.
    ///
    /// # Errors
    ///
    /// - [`AbiError::UnknownSelector`] if no declared function has the selector
    /// - [`AbiError::Decode`] if the data is shorter than a selector or the
    ///   arguments do not decode
    pub fn decode_call(&self, data: &[u8]) -> Result<(String, Vec<AbiValue>), AbiError> {
        if data.len() < 4 {
            return Err(AbiError::decode(
                "call data",
                format!("{} bytes is shorter than a selector", data.len()),
            ));
        }

        let (selector, payload) = data.split_at(4);
        let function = self
            .function_by_selector(selector)
            .ok_or_else(|| AbiError::UnknownSelector {
                selector: hex::encode_prefixed(selector),
            })?;

        let values = decode_params(&function.inputs, payload)
            .map_err(|details| AbiError::decode(&function.abi.name, details))?;

        Ok((function.abi.name.clone(), values))
    }

    /// Decode a log of the event `event_name`.
    ///
    /// Indexed parameters are read from `topics[1..]`, the rest from `data`.
    /// Indexed parameters of reference type (`bytes`, arrays, tuples) are only
    /// present as their keccak256 hash and are returned as that 32-byte value.
    ///
    /// # Errors
    ///
    /// - [`AbiError::UnknownEvent`] if `event_name` is not declared
    /// - [`AbiError::Decode`] if the topic count or `topics[0]` does not match
    ///   the declaration, or the data is malformed
    pub fn decode_log(
        &self,
        event_name: &str,
        topics: &[B256],
        data: &[u8],
    ) -> Result<DecodedFields, AbiError> {
        let event = self.event(event_name)?;
        decode_event(event, topics, data)
    }

    /// Decode a log of whichever declared event matches `topics[0]`.
    ///
    /// Returns the event name together with its fields.
    pub fn decode_any_log(
        &self,
        topics: &[B256],
        data: &[u8],
    ) -> Result<(String, DecodedFields), AbiError> {
        let signature = topics
            .first()
            .ok_or_else(|| AbiError::decode("log", "log has no topics"))?;
        let event = self.event_by_topic(signature).ok_or_else(|| {
            AbiError::decode("log", format!("no declared event has topic {signature}"))
        })?;

        let fields = decode_event(event, topics, data)?;
        Ok((event.abi.name.clone(), fields))
    }
}

fn decode_event(event: &EventDecl, topics: &[B256], data: &[u8]) -> Result<DecodedFields, AbiError> {
    let name = event.abi.name.as_str();
    let expected_topics = 1 + event.indexed_count();
    if topics.len() != expected_topics {
        return Err(AbiError::decode(
            name,
            format!("expected {expected_topics} topics, got {}", topics.len()),
        ));
    }
    if topics[0] != event.topic {
        return Err(AbiError::decode(
            name,
            format!("topic {} does not match {}", topics[0], event.topic),
        ));
    }

    let body_types: Vec<DynSolType> = event
        .fields
        .iter()
        .filter(|f| !f.indexed)
        .map(|f| f.ty.clone())
        .collect();
    let mut body = decode_params(&body_types, data)
        .map_err(|details| AbiError::decode(name, details))?
        .into_iter();
    let mut indexed = topics[1..].iter();

    let mut fields = Vec::with_capacity(event.fields.len());
    for field in &event.fields {
        let value = if field.indexed {
            let topic = indexed
                .next()
                .ok_or_else(|| AbiError::decode(name, "missing indexed topic"))?;
            decode_topic(&field.ty, topic)
                .map_err(|details| AbiError::decode(name, format!("`{}`: {details}", field.name)))?
        } else {
            body.next()
                .ok_or_else(|| AbiError::decode(name, "missing data field"))?
        };
        fields.push((field.name.clone(), value));
    }

    Ok(DecodedFields::new(fields))
}

/// Decode one indexed topic.
///
/// Value types occupy the 32-byte word directly; anything else was hashed by
/// the emitter and cannot be recovered.
fn decode_topic(ty: &DynSolType, topic: &B256) -> Result<AbiValue, String> {
    match ty {
        DynSolType::Uint(bits) => {
            let value = U256::from_be_bytes(topic.0);
            if value.bit_len() > *bits {
                return Err(format!("value does not fit in uint{bits}"));
            }
            Ok(AbiValue::Uint(value))
        }
        DynSolType::Address => {
            if topic[..12].iter().any(|b| *b != 0) {
                return Err("address topic has non-zero padding".to_string());
            }
            Ok(AbiValue::Address(Address::from_word(*topic)))
        }
        DynSolType::Bool => match U256::from_be_bytes(topic.0) {
            v if v.is_zero() => Ok(AbiValue::Bool(false)),
            v if v == U256::from(1u8) => Ok(AbiValue::Bool(true)),
            _ => Err("bool topic is neither 0 nor 1".to_string()),
        },
        DynSolType::FixedBytes(size) => {
            if topic[*size..].iter().any(|b| *b != 0) {
                return Err(format!("bytes{size} topic has non-zero padding"));
            }
            Ok(AbiValue::Bytes(Bytes::copy_from_slice(&topic[..*size])))
        }
        _ => Ok(AbiValue::Bytes(Bytes::copy_from_slice(topic.as_slice()))),
    }
}

/// Decode a parameter list, rejecting payloads that are not canonical.
fn decode_params(types: &[DynSolType], data: &[u8]) -> Result<Vec<AbiValue>, String> {
    let static_len = types
        .iter()
        .map(static_words)
        .sum::<Option<usize>>()
        .map(|words| words * 32);

    match static_len {
        Some(expected) if data.len() != expected => {
            return Err(format!("expected {expected} bytes of data, got {}", data.len()));
        }
        None if data.len() % 32 != 0 => {
            return Err(format!("data length {} is not word aligned", data.len()));
        }
        _ => {}
    }

    let tuple = DynSolType::Tuple(types.to_vec());
    let decoded = tuple.abi_decode_params(data).map_err(|e| e.to_string())?;

    if decoded.abi_encode_params() != data {
        return Err("data is not canonically encoded".to_string());
    }
    check_widths(&tuple, &decoded)?;

    let values = match decoded {
        DynSolValue::Tuple(values) => values,
        other => vec![other],
    };
    if values.len() != types.len() {
        return Err(format!(
            "decoded {} values for {} parameters",
            values.len(),
            types.len()
        ));
    }

    values.into_iter().map(AbiValue::from_dyn).collect()
}

/// Reject integers wider than their declared `uintN`.
fn check_widths(ty: &DynSolType, value: &DynSolValue) -> Result<(), String> {
    match (ty, value) {
        (DynSolType::Uint(bits), DynSolValue::Uint(value, _)) => {
            if value.bit_len() > *bits {
                return Err(format!("value does not fit in uint{bits}"));
            }
            Ok(())
        }
        (DynSolType::Array(inner), DynSolValue::Array(items))
        | (DynSolType::FixedArray(inner, _), DynSolValue::FixedArray(items)) => {
            items.iter().try_for_each(|item| check_widths(inner, item))
        }
        (DynSolType::Tuple(types), DynSolValue::Tuple(items)) => types
            .iter()
            .zip(items)
            .try_for_each(|(ty, item)| check_widths(ty, item)),
        _ => Ok(()),
    }
}

/// Size in words of a statically sized type, `None` for dynamic types.
fn static_words(ty: &DynSolType) -> Option<usize> {
    match ty {
        DynSolType::Uint(_)
        | DynSolType::Int(_)
        | DynSolType::Address
        | DynSolType::Bool
        | DynSolType::FixedBytes(_) => Some(1),
        DynSolType::FixedArray(inner, len) => static_words(inner).map(|words| words * len),
        DynSolType::Tuple(items) => items.iter().map(static_words).sum(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    const TRANSFER_TOPIC: B256 =
        b256!("0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");

    fn interface() -> ContractInterface {
        ContractInterface::erc20().unwrap()
    }

    fn transfer_log() -> (Vec<B256>, Vec<u8>) {
        let from = address!("0x1111111111111111111111111111111111111111");
        let to = address!("0x2222222222222222222222222222222222222222");
        let topics = vec![TRANSFER_TOPIC, from.into_word(), to.into_word()];
        let data = U256::from(100_000_000u64).to_be_bytes::<32>().to_vec();
        (topics, data)
    }

    #[test]
    fn test_encode_transfer_layout() {
        let to = address!("0x00000000000000000000000000000000000000aa");
        let data = interface()
            .encode_call(
                "transfer",
                &[AbiValue::Address(to), AbiValue::Uint(U256::from(10_000_000u64))],
            )
            .unwrap();

        assert_eq!(&data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(&data[4..36], to.into_word().as_slice());
        assert_eq!(
            U256::from_be_slice(&data[36..68]),
            U256::from(10_000_000u64)
        );
    }

    #[test]
    fn test_encode_rejects_wrong_arity() {
        let err = interface()
            .encode_call("transfer", &[AbiValue::Uint(U256::from(1u8))])
            .unwrap_err();
        assert!(matches!(err, AbiError::TypeMismatch { .. }));
    }

    #[test]
    fn test_encode_rejects_wrong_kind() {
        let err = interface()
            .encode_call(
                "transfer",
                &[AbiValue::Uint(U256::from(1u8)), AbiValue::Uint(U256::from(1u8))],
            )
            .unwrap_err();
        match err {
            AbiError::TypeMismatch { function, details } => {
                assert_eq!(function, "transfer");
                assert!(details.contains("`to`"), "{details}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_encode_unknown_method() {
        let err = interface().encode_call("mint", &[]).unwrap_err();
        assert_eq!(err, AbiError::unknown_method("mint"));
    }

    #[test]
    fn test_decode_call_round_trip() {
        let args = vec![
            AbiValue::Address(address!("0x3333333333333333333333333333333333333333")),
            AbiValue::Uint(U256::from(42u64)),
        ];
        let data = interface().encode_call("approve", &args).unwrap();
        let (name, decoded) = interface().decode_call(&data).unwrap();
        assert_eq!(name, "approve");
        assert_eq!(decoded, args);
    }

    #[test]
    fn test_decode_call_without_arguments() {
        let data = interface().encode_call("totalSupply", &[]).unwrap();
        assert_eq!(data.len(), 4);
        let (name, decoded) = interface().decode_call(&data).unwrap();
        assert_eq!(name, "totalSupply");
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_call_unknown_selector() {
        let err = interface().decode_call(&[0xde, 0xad, 0xbe, 0xef]).unwrap_err();
        assert_eq!(
            err,
            AbiError::UnknownSelector {
                selector: "0xdeadbeef".to_string()
            }
        );
    }

    #[test]
    fn test_decode_call_truncated() {
        assert!(matches!(
            interface().decode_call(&[0xa9, 0x05]).unwrap_err(),
            AbiError::Decode { .. }
        ));

        let mut data = interface()
            .encode_call(
                "transfer",
                &[AbiValue::Address(Address::ZERO), AbiValue::Uint(U256::from(1u8))],
            )
            .unwrap()
            .to_vec();
        data.truncate(50);
        assert!(matches!(
            interface().decode_call(&data).unwrap_err(),
            AbiError::Decode { .. }
        ));
    }

    #[test]
    fn test_decode_transfer_log() {
        let (topics, data) = transfer_log();
        let fields = interface().decode_log("Transfer", &topics, &data).unwrap();

        let keys: Vec<_> = fields.keys().collect();
        assert_eq!(keys, vec!["from", "to", "value"]);
        assert_eq!(
            fields.get("from").and_then(AbiValue::as_address),
            Some(address!("0x1111111111111111111111111111111111111111"))
        );
        assert_eq!(
            fields.get("value").and_then(AbiValue::as_uint),
            Some(U256::from(100_000_000u64))
        );
    }

    #[test]
    fn test_decode_log_wrong_topic_count() {
        let (mut topics, data) = transfer_log();
        topics.pop();
        let err = interface().decode_log("Transfer", &topics, &data).unwrap_err();
        match err {
            AbiError::Decode { target, details } => {
                assert_eq!(target, "Transfer");
                assert_eq!(details, "expected 3 topics, got 2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_log_wrong_signature_topic() {
        let (mut topics, data) = transfer_log();
        topics[0] = interface().event_topic("Approval").unwrap();
        assert!(matches!(
            interface().decode_log("Transfer", &topics, &data).unwrap_err(),
            AbiError::Decode { .. }
        ));
    }

    #[test]
    fn test_decode_log_rejects_short_and_long_data() {
        let (topics, data) = transfer_log();
        assert!(interface()
            .decode_log("Transfer", &topics, &data[..31])
            .is_err());

        let mut long = data.clone();
        long.extend_from_slice(&[0u8; 32]);
        assert!(interface().decode_log("Transfer", &topics, &long).is_err());
    }

    #[test]
    fn test_decode_log_rejects_dirty_address_topic() {
        let (mut topics, data) = transfer_log();
        topics[1].0[0] = 0xff;
        assert!(matches!(
            interface().decode_log("Transfer", &topics, &data).unwrap_err(),
            AbiError::Decode { .. }
        ));
    }

    #[test]
    fn test_decode_any_log_resolves_event() {
        let (topics, data) = transfer_log();
        let (name, fields) = interface().decode_any_log(&topics, &data).unwrap();
        assert_eq!(name, "Transfer");
        assert_eq!(fields.len(), 3);

        assert!(interface().decode_any_log(&[], &data).is_err());
        assert!(interface().decode_any_log(&[B256::ZERO], &data).is_err());
    }

    #[test]
    fn test_decode_dynamic_payload() {
        let interface =
            ContractInterface::parse(&["event Note(address indexed who, bytes memo, uint8[] tags)"])
                .unwrap();
        let memo = AbiValue::Bytes(Bytes::from_static(b"hello"));
        let tags = AbiValue::List(vec![
            AbiValue::Uint(U256::from(1u8)),
            AbiValue::Uint(U256::from(2u8)),
        ]);
        let data = DynSolValue::Tuple(vec![
            memo.to_dyn(&DynSolType::Bytes).unwrap(),
            tags.to_dyn(&DynSolType::Array(Box::new(DynSolType::Uint(8))))
                .unwrap(),
        ])
        .abi_encode_params();
        let who = address!("0x4444444444444444444444444444444444444444");
        let topics = vec![interface.event_topic("Note").unwrap(), who.into_word()];

        let fields = interface.decode_log("Note", &topics, &data).unwrap();
        assert_eq!(fields.get("memo"), Some(&memo));
        assert_eq!(fields.get("tags"), Some(&tags));
    }

    #[test]
    fn test_decode_dynamic_payload_rejects_trailing_bytes() {
        let interface = ContractInterface::parse(&["event Note(bytes memo)"]).unwrap();
        let mut data = DynSolValue::Tuple(vec![DynSolValue::Bytes(b"hi".to_vec())])
            .abi_encode_params();
        data.extend_from_slice(&[0xff; 64]);
        let topics = vec![interface.event_topic("Note").unwrap()];

        let err = interface.decode_log("Note", &topics, &data).unwrap_err();
        assert!(matches!(err, AbiError::Decode { .. }), "{err:?}");
    }

    #[test]
    fn test_decode_data_rejects_value_wider_than_declared() {
        let interface = ContractInterface::parse(&[
            "event Small(uint8 v)",
            "event Tags(uint8[] tags)",
        ])
        .unwrap();

        let data = U256::from(256u16).to_be_bytes::<32>().to_vec();
        let topics = vec![interface.event_topic("Small").unwrap()];
        let err = interface.decode_log("Small", &topics, &data).unwrap_err();
        assert!(matches!(err, AbiError::Decode { .. }), "{err:?}");

        let data = U256::from(255u16).to_be_bytes::<32>().to_vec();
        let fields = interface.decode_log("Small", &topics, &data).unwrap();
        assert_eq!(fields.get("v"), Some(&AbiValue::Uint(U256::from(255u16))));

        let data = DynSolValue::Tuple(vec![DynSolValue::Array(vec![
            DynSolValue::Uint(U256::from(1u8), 256),
            DynSolValue::Uint(U256::from(300u16), 256),
        ])])
        .abi_encode_params();
        let topics = vec![interface.event_topic("Tags").unwrap()];
        let err = interface.decode_log("Tags", &topics, &data).unwrap_err();
        assert!(matches!(err, AbiError::Decode { .. }), "{err:?}");
    }

    #[test]
    fn test_indexed_reference_type_yields_hash() {
        let interface = ContractInterface::parse(&["event Tagged(bytes indexed tag)"]).unwrap();
        let hash = alloy_primitives::keccak256(b"tag");
        let topics = vec![interface.event_topic("Tagged").unwrap(), hash];
        let fields = interface.decode_log("Tagged", &topics, &[]).unwrap();
        assert_eq!(
            fields.get("tag"),
            Some(&AbiValue::Bytes(Bytes::copy_from_slice(hash.as_slice())))
        );
    }
}

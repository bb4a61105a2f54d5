// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Contract interface declarations
//!
//! A [`ContractInterface`] is built once from human-readable declarations and
//! never mutated afterwards. It precomputes function selectors and event
//! topics so encoding and decoding never hash signatures on the hot path.

use alloy_dyn_abi::{DynSolType, Specifier};
use alloy_json_abi::{Event, Function};
use alloy_primitives::{Selector, B256};

use crate::errors::AbiError;

/// Human-readable declarations of the ERC-20 (USDT) contract surface.
pub const ERC20_DECLARATIONS: &[&str] = &[
    "function totalSupply() view returns (uint256 totalSupply)",
    "function balanceOf(address who) view returns (uint256 balance)",
    "function allowance(address owner, address spender) view returns (uint256 allowance)",
    "function transfer(address to, uint256 value)",
    "function transferFrom(address from, address to, uint256 value)",
    "function approve(address spender, uint256 value)",
    "event Transfer(address indexed from, address indexed to, uint256 value)",
    "event Approval(address indexed owner, address indexed spender, uint256 value)",
];

/// A declared function with its resolved input types.
#[derive(Debug, Clone)]
pub(crate) struct FunctionDecl {
    pub(crate) abi: Function,
    pub(crate) inputs: Vec<DynSolType>,
    pub(crate) selector: Selector,
}

impl FunctionDecl {
    /// Name of input `index`, or its position when the declaration left it unnamed.
    pub(crate) fn input_name(&self, index: usize) -> String {
        field_name(
            self.abi.inputs.get(index).map(|p| p.name.as_str()),
            index,
        )
    }
}

/// One event parameter with its resolved type.
#[derive(Debug, Clone)]
pub(crate) struct EventField {
    pub(crate) name: String,
    pub(crate) ty: DynSolType,
    pub(crate) indexed: bool,
}

/// A declared event with its precomputed topic.
#[derive(Debug, Clone)]
pub(crate) struct EventDecl {
    pub(crate) abi: Event,
    pub(crate) fields: Vec<EventField>,
    pub(crate) topic: B256,
}

impl EventDecl {
    pub(crate) fn indexed_count(&self) -> usize {
        self.fields.iter().filter(|f| f.indexed).count()
    }
}

/// The callable functions and emitted events of one contract.
///
/// Names are unique among functions and among events; overloads are not
/// supported. Every parameter type must map onto [`AbiValue`](crate::AbiValue):
/// `uintN`, `address`, `bool`, `bytes`, `bytesN`, arrays and tuples of those.
///
/// # Examples
///
/// ```
/// use erc20_relay::ContractInterface;
///
/// let interface = ContractInterface::parse(&[
///     "function transfer(address to, uint256 value)",
///     "event Transfer(address indexed from, address indexed to, uint256 value)",
/// ])
/// .unwrap();
///
/// assert_eq!(interface.function_selector("transfer").unwrap().to_string(), "0xa9059cbb");
/// assert!(interface.has_event("Transfer"));
/// ```
#[derive(Debug, Clone)]
pub struct ContractInterface {
    functions: Vec<FunctionDecl>,
    events: Vec<EventDecl>,
}

impl ContractInterface {
    /// Build an interface from `function ...` and `event ...` declarations.
    ///
    /// # Errors
    ///
    /// - [`AbiError::InvalidDeclaration`] if a line cannot be parsed or uses an
    ///   unsupported parameter type
    /// - [`AbiError::DuplicateDeclaration`] if a function or event name repeats
    pub fn parse(declarations: &[&str]) -> Result<Self, AbiError> {
        let mut functions: Vec<FunctionDecl> = Vec::new();
        let mut events: Vec<EventDecl> = Vec::new();

        for declaration in declarations {
            let declaration = declaration.trim();
            if declaration.starts_with("function ") {
                let decl = parse_function(declaration)?;
                if functions.iter().any(|f| f.abi.name == decl.abi.name) {
                    return Err(AbiError::DuplicateDeclaration {
                        name: decl.abi.name,
                    });
                }
                functions.push(decl);
            } else if declaration.starts_with("event ") {
                let decl = parse_event(declaration)?;
                if events.iter().any(|e| e.abi.name == decl.abi.name) {
                    return Err(AbiError::DuplicateDeclaration {
                        name: decl.abi.name,
                    });
                }
                events.push(decl);
            } else {
                return Err(AbiError::invalid_declaration(
                    declaration,
                    "expected a `function` or `event` declaration",
                ));
            }
        }

        Ok(Self { functions, events })
    }

    /// The ERC-20 interface used for USDT.
    pub fn erc20() -> Result<Self, AbiError> {
        Self::parse(ERC20_DECLARATIONS)
    }

    /// Names of declared functions, in declaration order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(|f| f.abi.name.as_str())
    }

    /// Names of declared events, in declaration order.
    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.events.iter().map(|e| e.abi.name.as_str())
    }

    /// Whether a function with this name is declared.
    pub fn has_function(&self, name: &str) -> bool {
        self.functions.iter().any(|f| f.abi.name == name)
    }

    /// Whether an event with this name is declared.
    pub fn has_event(&self, name: &str) -> bool {
        self.events.iter().any(|e| e.abi.name == name)
    }

    /// Canonical signature of a declared function, e.g. `transfer(address,uint256)`.
    pub fn function_signature(&self, name: &str) -> Result<String, AbiError> {
        Ok(self.function(name)?.abi.signature())
    }

    /// Canonical signature of a declared event, e.g. `Transfer(address,address,uint256)`.
    pub fn event_signature(&self, name: &str) -> Result<String, AbiError> {
        Ok(self.event(name)?.abi.signature())
    }

    /// First four bytes of keccak256 of the function's canonical signature.
    pub fn function_selector(&self, name: &str) -> Result<Selector, AbiError> {
        Ok(self.function(name)?.selector)
    }

    /// keccak256 of the event's canonical signature (`topics[0]` of its logs).
    pub fn event_topic(&self, name: &str) -> Result<B256, AbiError> {
        Ok(self.event(name)?.topic)
    }

    pub(crate) fn function(&self, name: &str) -> Result<&FunctionDecl, AbiError> {
        self.functions
            .iter()
            .find(|f| f.abi.name == name)
            .ok_or_else(|| AbiError::unknown_method(name))
    }

    pub(crate) fn function_by_selector(&self, selector: &[u8]) -> Option<&FunctionDecl> {
        self.functions
            .iter()
            .find(|f| f.selector.as_slice() == selector)
    }

    pub(crate) fn event(&self, name: &str) -> Result<&EventDecl, AbiError> {
        self.events
            .iter()
            .find(|e| e.abi.name == name)
            .ok_or_else(|| AbiError::unknown_event(name))
    }

    pub(crate) fn event_by_topic(&self, topic: &B256) -> Option<&EventDecl> {
        self.events.iter().find(|e| &e.topic == topic)
    }
}

fn parse_function(declaration: &str) -> Result<FunctionDecl, AbiError> {
    let abi = Function::parse(declaration)
        .map_err(|e| AbiError::invalid_declaration(declaration, e.to_string()))?;

    let inputs = abi
        .inputs
        .iter()
        .map(|param| {
            let ty = param
                .resolve()
                .map_err(|e| AbiError::invalid_declaration(declaration, e.to_string()))?;
            ensure_supported(&ty)
                .map_err(|details| AbiError::invalid_declaration(declaration, details))?;
            Ok(ty)
        })
        .collect::<Result<Vec<_>, AbiError>>()?;

    let selector = abi.selector();
    Ok(FunctionDecl {
        abi,
        inputs,
        selector,
    })
}

fn parse_event(declaration: &str) -> Result<EventDecl, AbiError> {
    let abi = Event::parse(declaration)
        .map_err(|e| AbiError::invalid_declaration(declaration, e.to_string()))?;
    if abi.anonymous {
        return Err(AbiError::invalid_declaration(
            declaration,
            "anonymous events have no topic to match on",
        ));
    }

    let fields = abi
        .inputs
        .iter()
        .enumerate()
        .map(|(index, param)| {
            let ty = param
                .resolve()
                .map_err(|e| AbiError::invalid_declaration(declaration, e.to_string()))?;
            ensure_supported(&ty)
                .map_err(|details| AbiError::invalid_declaration(declaration, details))?;
            Ok(EventField {
                name: field_name(Some(param.name.as_str()), index),
                ty,
                indexed: param.indexed,
            })
        })
        .collect::<Result<Vec<_>, AbiError>>()?;

    let topic = abi.selector();
    Ok(EventDecl { abi, fields, topic })
}

fn field_name(declared: Option<&str>, index: usize) -> String {
    match declared {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => index.to_string(),
    }
}

fn ensure_supported(ty: &DynSolType) -> Result<(), String> {
    match ty {
        DynSolType::Uint(_)
        | DynSolType::Address
        | DynSolType::Bool
        | DynSolType::Bytes
        | DynSolType::FixedBytes(_) => Ok(()),
        DynSolType::Array(inner) | DynSolType::FixedArray(inner, _) => ensure_supported(inner),
        DynSolType::Tuple(items) => items.iter().try_for_each(ensure_supported),
        other => Err(format!("unsupported parameter type {}", other.sol_type_name())),
    }
}
